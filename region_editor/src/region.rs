use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// One overlay cell: a privacy mask, a text label or a motion grid cell.
///
/// Coordinates are in current canvas pixels. A cell with zero width and zero
/// height is an empty slot; the device reports unused mask slots that way, so
/// the convention is kept rather than tracked separately.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Region {
    pub enabled: bool,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub content: String,
    pub shadow: bool,
}

impl Region {
    pub fn new(enabled: bool, rect: Rect) -> Self {
        Self {
            enabled,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            content: String::new(),
            shadow: false,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    pub fn is_empty_slot(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Turn the region back into an empty slot.
    pub fn vacate(&mut self) {
        self.set_rect(Rect::default());
    }

    /// Fold negative extents left by a draw gesture into the origin.
    pub fn normalize(&mut self) {
        let rect = self.rect().normalized();
        self.set_rect(rect);
    }

    /// Inclusive point test. Degenerate or inverted regions never match.
    pub fn contains(&self, p: Point) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && p.x >= self.x
            && p.x <= self.x + self.width
            && p.y >= self.y
            && p.y <= self.y + self.height
    }
}

/// Partial update applied by [`RegionStore::set`](crate::store::RegionStore::set).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionPatch {
    pub enabled: Option<bool>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub content: Option<String>,
    pub shadow: Option<bool>,
}

impl RegionPatch {
    pub fn apply(self, region: &mut Region) {
        if let Some(v) = self.enabled {
            region.enabled = v;
        }
        if let Some(v) = self.x {
            region.x = v;
        }
        if let Some(v) = self.y {
            region.y = v;
        }
        if let Some(v) = self.width {
            region.width = v;
        }
        if let Some(v) = self.height {
            region.height = v;
        }
        if let Some(v) = self.content {
            region.content = v;
        }
        if let Some(v) = self.shadow {
            region.shadow = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot() {
        let mut region = Region::new(true, Rect::new(10.0, 10.0, 5.0, 5.0));
        assert!(!region.is_empty_slot());
        region.vacate();
        assert!(region.is_empty_slot());
        assert_eq!(region.x, 0.0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let region = Region::new(true, Rect::new(10.0, 10.0, 20.0, 20.0));
        assert!(region.contains(Point::new(10.0, 10.0)));
        assert!(region.contains(Point::new(30.0, 30.0)));
        assert!(!region.contains(Point::new(30.1, 20.0)));
    }

    #[test]
    fn test_inverted_region_never_contains() {
        let region = Region::new(true, Rect::new(30.0, 30.0, -20.0, -20.0));
        assert!(!region.contains(Point::new(20.0, 20.0)));
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut region = Region::new(false, Rect::new(1.0, 2.0, 3.0, 4.0)).with_content("cam");
        RegionPatch {
            enabled: Some(true),
            width: Some(9.0),
            ..Default::default()
        }
        .apply(&mut region);
        assert!(region.enabled);
        assert_eq!(region.rect(), Rect::new(1.0, 2.0, 9.0, 4.0));
        assert_eq!(region.content, "cam");
    }
}

//! Sizing the drawing canvas inside its container.

use std::str::FromStr;

use crate::error::EditorError;
use crate::geometry::Size;

/// Share of the sidebar height used when the canvas would be too tall.
const TALL_CANVAS_FILL: f32 = 0.8;
/// Height reserved for the control menu under the player.
pub const MENU_HEIGHT: f32 = 40.0;

/// Video resolution as reported by the device, e.g. `"1920*1080"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Height over width.
    pub fn aspect(&self) -> f32 {
        self.height as f32 / self.width as f32
    }
}

impl FromStr for Resolution {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EditorError::InvalidResolution(s.to_string());
        let (w, h) = s.split_once('*').ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

pub fn parse_resolution(s: &str) -> Result<Resolution, EditorError> {
    s.parse()
}

/// Canvas size for a container `box_width` wide, keeping `aspect`
/// (height / width). A canvas taller than the sidebar is shrunk to fill
/// most of it instead.
pub fn fit_canvas(box_width: f32, aspect: f32, sidebar_height: f32) -> Size {
    let mut width = box_width;
    if width * aspect > sidebar_height {
        width = (sidebar_height * TALL_CANVAS_FILL / aspect).round();
    }
    Size::new(width, width * aspect)
}

/// Canvas size when the custom control menu sits under the player. The video
/// is scaled to the box width, then down to the height left by the menu.
/// `None` while the video size is unknown.
pub fn fit_with_menu(video: Size, box_width: f32, sidebar_height: f32) -> Option<Size> {
    if video.width <= 0.0 || video.height <= 0.0 {
        return None;
    }
    let usable_height = sidebar_height - MENU_HEIGHT;
    let mut width = video.width;
    let mut height = video.height;
    if width != box_width {
        height = (height * box_width / width).ceil();
        width = box_width;
    }
    if height > usable_height {
        width = (width * usable_height / height).ceil();
        height = usable_height;
    }
    Some(Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolution() {
        let r = parse_resolution("1920*1080").unwrap();
        assert_eq!(r, Resolution { width: 1920, height: 1080 });
        assert_eq!(r.aspect(), 0.5625);
        assert_eq!(parse_resolution(" 640 * 480 ").unwrap().aspect(), 0.75);
    }

    #[test]
    fn test_parse_resolution_rejects_garbage() {
        for raw in ["", "1920x1080", "*1080", "1920*", "0*1080", "a*b"] {
            assert!(
                matches!(parse_resolution(raw), Err(EditorError::InvalidResolution(_))),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_fit_canvas_uses_box_width() {
        let size = fit_canvas(800.0, 0.5625, 900.0);
        assert_eq!(size, Size::new(800.0, 450.0));
    }

    #[test]
    fn test_fit_canvas_shrinks_tall_canvas() {
        let size = fit_canvas(1000.0, 0.75, 600.0);
        assert_eq!(size.width, 640.0);
        assert_eq!(size.height, 480.0);
    }

    #[test]
    fn test_fit_with_menu() {
        assert_eq!(fit_with_menu(Size::new(0.0, 0.0), 800.0, 600.0), None);
        let size = fit_with_menu(Size::new(1920.0, 1080.0), 800.0, 1000.0).unwrap();
        assert_eq!(size, Size::new(800.0, 450.0));
        let size = fit_with_menu(Size::new(1920.0, 1080.0), 800.0, 400.0).unwrap();
        assert_eq!(size.height, 360.0);
        assert_eq!(size.width, 640.0);
    }
}

//! Pointer hit testing. Store order and handle order are the priority
//! order: the first match wins.

use crate::geometry::Point;
use crate::handles::{Handle, HandleSet};
use crate::store::RegionStore;

/// Index of the first region with a positive extent containing `p`.
pub fn hit_region(store: &RegionStore, p: Point) -> Option<usize> {
    store.iter().position(|region| region.contains(p))
}

pub fn hit_handle(handles: Option<&HandleSet>, p: Point) -> Option<Handle> {
    handles.and_then(|set| set.hit(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::region::Region;

    #[test]
    fn test_overlap_returns_lower_index() {
        let mut store = RegionStore::new();
        store.push(Region::new(true, Rect::new(0.0, 0.0, 100.0, 100.0)));
        store.push(Region::new(true, Rect::new(50.0, 50.0, 100.0, 100.0)));
        assert_eq!(hit_region(&store, Point::new(75.0, 75.0)), Some(0));
        assert_eq!(hit_region(&store, Point::new(125.0, 125.0)), Some(1));
        assert_eq!(hit_region(&store, Point::new(175.0, 5.0)), None);
    }

    #[test]
    fn test_empty_slots_are_skipped() {
        let mut store = RegionStore::new();
        store.push(Region::default());
        store.push(Region::new(true, Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(hit_region(&store, Point::new(0.0, 0.0)), Some(1));
    }

    #[test]
    fn test_disabled_regions_still_hit() {
        let mut store = RegionStore::new();
        store.push(Region::new(false, Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(hit_region(&store, Point::new(5.0, 5.0)), Some(0));
    }

    #[test]
    fn test_no_handles_no_hit() {
        assert_eq!(hit_handle(None, Point::new(0.0, 0.0)), None);
        let set = HandleSet::from_rect(&Rect::new(2.0, 2.0, 20.0, 20.0));
        assert_eq!(
            hit_handle(Some(&set), Point::new(0.0, 0.0)),
            Some(Handle::TopLeft)
        );
    }
}

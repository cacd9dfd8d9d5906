use crate::coords::Proportion;
use crate::region::{Region, RegionPatch};

/// Ordered collection of regions. The index of a region is its identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionStore {
    regions: Vec<Region>,
}

impl RegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, region: Region) -> usize {
        self.regions.push(region);
        self.regions.len() - 1
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Region> {
        self.regions.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Region> {
        self.regions.iter_mut()
    }

    /// Apply `patch` in place. A missing index is logged and ignored.
    pub fn set(&mut self, index: usize, patch: RegionPatch) -> bool {
        match self.regions.get_mut(index) {
            Some(region) => {
                patch.apply(region);
                true
            }
            None => {
                log::warn!(
                    "set: region {index} does not exist ({} stored)",
                    self.regions.len()
                );
                false
            }
        }
    }

    /// Multiply every region by `new / old` on each axis.
    pub fn rescale(&mut self, old: Proportion, new: Proportion) {
        let sx = new.width_ratio / old.width_ratio;
        let sy = new.height_ratio / old.height_ratio;
        if !sx.is_finite() || !sy.is_finite() {
            log::warn!("rescale: skipping degenerate proportion {old:?} -> {new:?}");
            return;
        }
        for region in &mut self.regions {
            region.x *= sx;
            region.y *= sy;
            region.width *= sx;
            region.height *= sy;
        }
    }

    pub fn find_first_empty(&self) -> Option<usize> {
        self.regions.iter().position(Region::is_empty_slot)
    }

    /// Turn every region into an empty slot.
    pub fn vacate_all(&mut self) {
        for region in &mut self.regions {
            region.vacate();
        }
    }

    pub fn disable_all(&mut self) {
        for region in &mut self.regions {
            region.enabled = false;
        }
    }

    pub fn normalize(&mut self, index: usize) -> Option<&Region> {
        let region = self.regions.get_mut(index)?;
        region.normalize();
        Some(region)
    }
}

impl<'a> IntoIterator for &'a RegionStore {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

//! Motion detection grid and its hex wire format.
//!
//! The device stores the grid row by row, four cells per hex digit. Cell `j`
//! of a group of four is bit `j` of the digit, so a row `[0, 0, 1, 0]`
//! travels as `"4"`. The column count is padded up to a multiple of four.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::geometry::{Point, Rect, Size};
use crate::region::Region;
use crate::store::RegionStore;

const CELLS_PER_DIGIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionGrid {
    requested_columns: usize,
    columns: usize,
    rows: usize,
    cells: Vec<bool>,
}

/// `x_count` rounded up to a whole number of hex digits, `None` on overflow.
pub fn padded_columns(x_count: usize) -> Option<usize> {
    x_count.div_ceil(CELLS_PER_DIGIT).checked_mul(CELLS_PER_DIGIT)
}

fn cell_count(x_count: usize, y_count: usize) -> Result<(usize, usize), CodecError> {
    padded_columns(x_count)
        .and_then(|columns| Some((columns, columns.checked_mul(y_count)?)))
        .ok_or(CodecError::GridTooLarge {
            columns: x_count,
            rows: y_count,
        })
}

impl MotionGrid {
    /// An all-disabled grid of `x_count` (padded) by `y_count` cells.
    pub fn new(x_count: usize, y_count: usize) -> Result<Self, CodecError> {
        let (columns, cells) = cell_count(x_count, y_count)?;
        Ok(Self {
            requested_columns: x_count,
            columns,
            rows: y_count,
            cells: vec![false; cells],
        })
    }

    pub fn decode(hex: &str, x_count: usize, y_count: usize) -> Result<Self, CodecError> {
        // Length is checked before anything is allocated.
        let (_, cells) = cell_count(x_count, y_count)?;
        let expected = cells / CELLS_PER_DIGIT;
        let actual = hex.chars().count();
        if actual != expected {
            return Err(CodecError::LengthMismatch { expected, actual });
        }
        let mut grid = Self::new(x_count, y_count)?;
        for (position, ch) in hex.chars().enumerate() {
            let nibble = ch
                .to_digit(16)
                .ok_or(CodecError::InvalidDigit { position, found: ch })?;
            for bit in 0..CELLS_PER_DIGIT {
                grid.cells[position * CELLS_PER_DIGIT + bit] = nibble & (1 << bit) != 0;
            }
        }
        Ok(grid)
    }

    pub fn encode(&self) -> String {
        self.cells
            .chunks(CELLS_PER_DIGIT)
            .map(|group| {
                let nibble = group
                    .iter()
                    .enumerate()
                    .fold(0u32, |acc, (bit, &on)| acc | (u32::from(on) << bit));
                // nibble < 16 always has a digit
                char::from_digit(nibble, 16)
                    .unwrap_or('0')
                    .to_ascii_uppercase()
            })
            .collect()
    }

    /// Column count as configured on the device, before padding.
    pub fn requested_columns(&self) -> usize {
        self.requested_columns
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn get(&self, column: usize, row: usize) -> Option<bool> {
        if column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    pub fn set(&mut self, column: usize, row: usize, enabled: bool) -> bool {
        if column >= self.columns || row >= self.rows {
            return false;
        }
        self.cells[row * self.columns + column] = enabled;
        true
    }

    /// One region per cell, row-major, sized so that the requested columns
    /// span the canvas. Padding columns land past the right edge.
    pub fn to_regions(&self, canvas: Size) -> Vec<Region> {
        if self.requested_columns == 0 || self.rows == 0 {
            return Vec::new();
        }
        let cell_w = canvas.width / self.requested_columns as f32;
        let cell_h = canvas.height / self.rows as f32;
        let mut regions = Vec::with_capacity(self.cells.len());
        for row in 0..self.rows {
            for column in 0..self.columns {
                let rect = Rect::new(
                    column as f32 * cell_w,
                    row as f32 * cell_h,
                    cell_w,
                    cell_h,
                );
                regions.push(Region::new(self.cells[row * self.columns + column], rect));
            }
        }
        regions
    }

    /// Pick the enabled flags back up from the regions built by
    /// [`to_regions`](Self::to_regions).
    pub fn sync_from(&mut self, store: &RegionStore) {
        if store.len() != self.cells.len() {
            log::warn!(
                "motion grid has {} cells but the store holds {} regions",
                self.cells.len(),
                store.len()
            );
        }
        for (cell, region) in self.cells.iter_mut().zip(store.iter()) {
            *cell = region.enabled;
        }
    }
}

/// How a motion drag decides which cells it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    /// The device console's rule: a corner of the cell strictly inside the
    /// drag box, or the cell strictly containing the pointer.
    #[default]
    Legacy,
    /// Any overlap between the cell and the drag box, edges included.
    Overlap,
}

/// Enable every cell touched by the drag from `origin` to `current`.
/// Cells are only ever switched on.
pub fn select_cells(store: &mut RegionStore, origin: Point, current: Point, rule: SelectionRule) {
    let min_x = origin.x.min(current.x);
    let max_x = origin.x.max(current.x);
    let min_y = origin.y.min(current.y);
    let max_y = origin.y.max(current.y);
    let inside = |x: f32, y: f32| x > min_x && x < max_x && y > min_y && y < max_y;

    for cell in store.iter_mut() {
        let right = cell.x + cell.width;
        let bottom = cell.y + cell.height;
        let hit = match rule {
            SelectionRule::Legacy => {
                inside(cell.x, cell.y)
                    || inside(right, bottom)
                    || inside(right, cell.y)
                    || inside(cell.x, bottom)
                    || (cell.x < current.x
                        && cell.y < current.y
                        && right > current.x
                        && bottom > current.y)
            }
            SelectionRule::Overlap => {
                cell.x <= max_x && right >= min_x && cell.y <= max_y && bottom >= min_y
            }
        };
        if hit {
            cell.enabled = true;
        }
    }
}

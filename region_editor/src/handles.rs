//! The eight resize handles drawn around the active region.

use crate::geometry::{Point, Rect};

/// Handles are stored shifted up-left by this much so that a
/// [`HANDLE_SIZE`] square is centered on the region boundary.
pub const HANDLE_OFFSET: f32 = 2.0;
pub const HANDLE_SIZE: f32 = 5.0;

// Pointer tolerance around a handle's stored position.
const HIT_SLACK_BEFORE: f32 = 1.0;
const HIT_SLACK_AFTER: f32 = 6.0;

/// Handle positions, clockwise from the top-left corner. Even indices are
/// corners, odd indices are edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft = 0,
    Top = 1,
    TopRight = 2,
    Right = 3,
    BottomRight = 4,
    Bottom = 5,
    BottomLeft = 6,
    Left = 7,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Handle> {
        Self::ALL.get(index).copied()
    }

    pub fn is_corner(self) -> bool {
        self.index() % 2 == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleSet {
    points: [Point; 8],
}

/// Handle points for a rectangle given by its edges, in handle space.
fn arrange(left: f32, top: f32, right: f32, bottom: f32) -> [Point; 8] {
    let mid_x = (left + right) / 2.0;
    let mid_y = (top + bottom) / 2.0;
    [
        Point::new(left, top),
        Point::new(mid_x, top),
        Point::new(right, top),
        Point::new(right, mid_y),
        Point::new(right, bottom),
        Point::new(mid_x, bottom),
        Point::new(left, bottom),
        Point::new(left, mid_y),
    ]
}

impl HandleSet {
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            points: arrange(
                rect.x - HANDLE_OFFSET,
                rect.y - HANDLE_OFFSET,
                rect.right() - HANDLE_OFFSET,
                rect.bottom() - HANDLE_OFFSET,
            ),
        }
    }

    pub fn point(&self, handle: Handle) -> Point {
        self.points[handle.index()]
    }

    pub fn points(&self) -> &[Point; 8] {
        &self.points
    }

    /// First handle whose enlarged touch box contains `p`.
    pub fn hit(&self, p: Point) -> Option<Handle> {
        Handle::ALL.into_iter().find(|h| {
            let hp = self.points[h.index()];
            p.x >= hp.x - HIT_SLACK_BEFORE
                && p.x <= hp.x + HIT_SLACK_AFTER
                && p.y >= hp.y - HIT_SLACK_BEFORE
                && p.y <= hp.y + HIT_SLACK_AFTER
        })
    }

    /// Move `handle` by the pointer delta.
    ///
    /// A handle never crosses the opposite side: the top-left corner stays at
    /// or above/left of the bottom-right one and so on. Every other handle is
    /// re-placed so the set describes the same rectangle, which leaves edge
    /// midpoints on the average of their two corners.
    pub fn drag(&mut self, handle: Handle, dx: f32, dy: f32) {
        let mut left = self.points[Handle::TopLeft.index()].x;
        let mut top = self.points[Handle::TopLeft.index()].y;
        let mut right = self.points[Handle::BottomRight.index()].x;
        let mut bottom = self.points[Handle::BottomRight.index()].y;

        let moves_left = matches!(handle, Handle::TopLeft | Handle::BottomLeft | Handle::Left);
        let moves_right = matches!(handle, Handle::TopRight | Handle::BottomRight | Handle::Right);
        let moves_top = matches!(handle, Handle::TopLeft | Handle::TopRight | Handle::Top);
        let moves_bottom = matches!(handle, Handle::BottomLeft | Handle::BottomRight | Handle::Bottom);

        if moves_left {
            left = (left + dx).min(right);
        }
        if moves_right {
            right = (right + dx).max(left);
        }
        if moves_top {
            top = (top + dy).min(bottom);
        }
        if moves_bottom {
            bottom = (bottom + dy).max(top);
        }

        self.points = arrange(left, top, right, bottom);
    }

    /// Region bounds described by the handles.
    pub fn bounds(&self) -> Rect {
        let tl = self.points[Handle::TopLeft.index()];
        let tr = self.points[Handle::TopRight.index()];
        let bl = self.points[Handle::BottomLeft.index()];
        Rect::new(
            tl.x + HANDLE_OFFSET,
            tl.y + HANDLE_OFFSET,
            tr.x - tl.x,
            bl.y - tl.y,
        )
    }

    /// Squares to paint for each handle.
    pub fn squares(&self) -> [Rect; 8] {
        self.points
            .map(|p| Rect::new(p.x, p.y, HANDLE_SIZE, HANDLE_SIZE))
    }
}

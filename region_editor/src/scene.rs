//! Backend-neutral display list for the editor overlay.

use crate::geometry::Rect;

/// Offset of label text from the region's top-left corner.
pub const LABEL_INSET: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Stroked region outline.
    Outline(Rect),
    /// Text drawn from its top-left corner; `size` is the glyph size in pixels.
    Label {
        x: f32,
        y: f32,
        text: String,
        size: f32,
    },
    /// Half-transparent black fill.
    Shade(Rect),
    /// Filled resize handle square.
    Handle(Rect),
}

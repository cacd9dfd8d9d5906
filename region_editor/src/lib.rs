//! Editing engine for privacy-mask regions and motion-detection grids drawn
//! over a video frame.
//!
//! Everything here is independent of any UI toolkit: callers feed canvas
//! relative pointer positions into [`editor::RegionEditor`] and read back a
//! [`scene::DrawOp`] display list, mask rectangles in device ("normal") space
//! and the hex encoded motion map expected by the firmware.

pub mod config;
pub mod coords;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod handles;
pub mod hit;
pub mod label;
pub mod layout;
pub mod motion;
pub mod ready;
pub mod region;
pub mod scene;
pub mod store;

pub use config::EditorConfig;
pub use coords::{CoordinateMapper, Proportion};
pub use editor::{DragState, EditorMode, PointerEvent, RegionEditor};
pub use error::{CodecError, EditorError};
pub use geometry::{NormalRect, Point, Rect, Size};
pub use handles::{Handle, HandleSet};
pub use motion::{MotionGrid, SelectionRule};
pub use region::{Region, RegionPatch};
pub use scene::DrawOp;
pub use store::RegionStore;

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};
use crate::label::DEFAULT_CHAR_LENGTH;
use crate::motion::SelectionRule;
use crate::ready::{DEFAULT_READY_POLL, DEFAULT_READY_TIMEOUT};

/// Inset from each canvas edge; a drag whose pointer enters it is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitMargins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Default for ExitMargins {
    fn default() -> Self {
        Self {
            left: 1.0,
            top: 1.0,
            right: 5.0,
            bottom: 3.0,
        }
    }
}

impl ExitMargins {
    pub fn is_outside(&self, p: Point, canvas: Size) -> bool {
        p.x < self.left
            || p.x > canvas.width - self.right
            || p.y < self.top
            || p.y > canvas.height - self.bottom
    }
}

/// Editor settings, usually read from a JSON file. Missing keys fall back
/// to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Device resolution that mask coordinates are expressed in.
    pub reference_width: f32,
    pub reference_height: f32,
    pub char_length: f32,
    /// Show and accept the resize handles of the active region.
    pub handles_enabled: bool,
    /// Allow dragging a region to move it.
    pub move_enabled: bool,
    pub selection_rule: SelectionRule,
    pub exit_margins: ExitMargins,
    pub ready_timeout_ms: u64,
    pub ready_poll_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            reference_width: 1920.0,
            reference_height: 1080.0,
            char_length: DEFAULT_CHAR_LENGTH,
            handles_enabled: true,
            move_enabled: true,
            selection_rule: SelectionRule::default(),
            exit_margins: ExitMargins::default(),
            ready_timeout_ms: DEFAULT_READY_TIMEOUT.as_millis() as u64,
            ready_poll_ms: DEFAULT_READY_POLL.as_millis() as u64,
        }
    }
}

impl EditorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read editor config {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse editor config {}", path.display()))?;
        Ok(config)
    }

    pub fn reference(&self) -> Size {
        Size::new(self.reference_width, self.reference_height)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    pub fn ready_poll(&self) -> Duration {
        Duration::from_millis(self.ready_poll_ms)
    }
}

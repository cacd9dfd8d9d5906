use serde::{Deserialize, Serialize};

pub const DEFAULT_CHAR_LENGTH: f32 = 16.0;
/// Vertical padding added to a label box around the glyph height.
const LABEL_PADDING: f32 = 6.0;

/// Sizing of text label regions. `char_length` is the pixel width of one
/// character on the canvas, also used as the font size when painting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelMetrics {
    pub char_length: f32,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self {
            char_length: DEFAULT_CHAR_LENGTH,
        }
    }
}

impl LabelMetrics {
    pub fn new(char_length: f32) -> Self {
        Self { char_length }
    }

    /// Scale a device font size onto the canvas.
    pub fn set_font_size(&mut self, size: f32, height_ratio: f32) {
        self.char_length = (size * height_ratio).ceil();
    }

    pub fn content_width(&self, content: &str) -> f32 {
        content.chars().count() as f32 * self.char_length
    }

    pub fn content_height(&self) -> f32 {
        self.char_length + LABEL_PADDING
    }

    /// Longest label, in characters, that fits across the canvas once mapped
    /// back to device space.
    pub fn max_content_len(&self, canvas_width: f32, width_ratio: f32) -> usize {
        if self.char_length <= 0.0 || width_ratio <= 0.0 {
            return 0;
        }
        (canvas_width / width_ratio / self.char_length).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_size() {
        let m = LabelMetrics::default();
        assert_eq!(m.content_width("Gate 1"), 96.0);
        assert_eq!(m.content_width(""), 0.0);
        assert_eq!(m.content_height(), 22.0);
    }

    #[test]
    fn test_width_counts_chars_not_bytes() {
        let m = LabelMetrics::new(10.0);
        assert_eq!(m.content_width("門口"), 20.0);
    }

    #[test]
    fn test_font_size_scales_and_rounds_up() {
        let mut m = LabelMetrics::default();
        m.set_font_size(32.0, 0.4);
        assert_eq!(m.char_length, 13.0);
    }

    #[test]
    fn test_max_content_len() {
        let m = LabelMetrics::new(16.0);
        assert_eq!(m.max_content_len(960.0, 0.5), 120);
        assert_eq!(m.max_content_len(100.0, 1.0), 7);
        assert_eq!(LabelMetrics::new(0.0).max_content_len(100.0, 1.0), 0);
    }
}

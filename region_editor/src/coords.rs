//! Mapping between the device's reference resolution and canvas pixels.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::geometry::{NormalRect, Rect, Size};

/// Canvas size divided by reference size, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proportion {
    pub width_ratio: f32,
    pub height_ratio: f32,
}

impl Proportion {
    pub const IDENTITY: Proportion = Proportion {
        width_ratio: 1.0,
        height_ratio: 1.0,
    };

    pub fn between(canvas: Size, reference: Size) -> Self {
        Self {
            width_ratio: canvas.width / reference.width,
            height_ratio: canvas.height / reference.height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    reference: Size,
    canvas: Size,
    proportion: Proportion,
}

fn check_reference(reference: Size) -> Result<(), EditorError> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(reference.width) && valid(reference.height) {
        Ok(())
    } else {
        Err(EditorError::InvalidReference {
            width: reference.width,
            height: reference.height,
        })
    }
}

impl CoordinateMapper {
    pub fn new(reference: Size, canvas: Size) -> Result<Self, EditorError> {
        check_reference(reference)?;
        Ok(Self {
            reference,
            canvas,
            proportion: Proportion::between(canvas, reference),
        })
    }

    pub fn reference(&self) -> Size {
        self.reference
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn proportion(&self) -> Proportion {
        self.proportion
    }

    pub fn set_reference(&mut self, width: f32, height: f32) -> Result<(), EditorError> {
        let reference = Size::new(width, height);
        check_reference(reference)?;
        self.reference = reference;
        self.proportion = Proportion::between(self.canvas, self.reference);
        Ok(())
    }

    /// Update the canvas size and return the proportion that was in effect
    /// before, so callers can rescale stored regions.
    pub fn set_canvas_size(&mut self, width: f32, height: f32) -> Proportion {
        let old = self.proportion;
        self.canvas = Size::new(width, height);
        self.proportion = Proportion::between(self.canvas, self.reference);
        old
    }

    pub fn to_canvas(&self, rect: NormalRect) -> Rect {
        Rect::new(
            rect.x as f32 * self.proportion.width_ratio,
            rect.y as f32 * self.proportion.height_ratio,
            rect.width as f32 * self.proportion.width_ratio,
            rect.height as f32 * self.proportion.height_ratio,
        )
    }

    /// Inverse of [`to_canvas`](Self::to_canvas). Every component is rounded
    /// up; the rectangle is expected to be normalized. Values that only miss
    /// a whole device pixel by float error map back to that pixel, so an
    /// untouched region survives the round trip.
    pub fn to_normal(&self, rect: &Rect) -> NormalRect {
        let wr = self.proportion.width_ratio;
        let hr = self.proportion.height_ratio;
        NormalRect {
            x: ceil_snapped(rect.x, wr),
            y: ceil_snapped(rect.y, hr),
            width: ceil_snapped(rect.width, wr),
            height: ceil_snapped(rect.height, hr),
        }
    }

    pub fn clamp_x(&self, x: f32, width: f32) -> f32 {
        clamp_axis(x, width, self.canvas.width)
    }

    pub fn clamp_y(&self, y: f32, height: f32) -> f32 {
        clamp_axis(y, height, self.canvas.height)
    }

    /// Intersection of a normalized `rect` with the canvas. Unlike the
    /// clamps, the edges inside the canvas stay where they are.
    pub fn clip(&self, rect: &Rect) -> Rect {
        let left = rect.x.max(0.0).min(self.canvas.width);
        let top = rect.y.max(0.0).min(self.canvas.height);
        let right = (rect.x + rect.width).min(self.canvas.width).max(left);
        let bottom = (rect.y + rect.height).min(self.canvas.height).max(top);
        Rect::new(left, top, right - left, bottom - top)
    }
}

fn ceil_snapped(canvas: f32, ratio: f32) -> u32 {
    let value = f64::from(canvas) / f64::from(ratio);
    let nearest = value.round();
    // f32 storage drifts by a few ulps per scaling step.
    let tolerance = (value.abs() * 1e-6).max(1e-3);
    if (value - nearest).abs() <= tolerance {
        nearest as u32
    } else {
        value.ceil() as u32
    }
}

fn clamp_axis(pos: f32, extent: f32, limit: f32) -> f32 {
    if pos < 0.0 {
        0.0
    } else if pos + extent > limit {
        (limit - extent).max(0.0)
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(Size::new(1920.0, 1080.0), Size::new(960.0, 540.0)).unwrap()
    }

    #[test]
    fn test_proportion_from_sizes() {
        let m = mapper();
        assert_eq!(m.proportion().width_ratio, 0.5);
        assert_eq!(m.proportion().height_ratio, 0.5);
    }

    #[test]
    fn test_rejects_zero_reference() {
        let err = CoordinateMapper::new(Size::new(0.0, 1080.0), Size::new(960.0, 540.0));
        assert!(matches!(err, Err(EditorError::InvalidReference { .. })));

        let mut m = mapper();
        assert!(m.set_reference(1920.0, f32::NAN).is_err());
        assert_eq!(m.reference(), Size::new(1920.0, 1080.0));
    }

    #[test]
    fn test_to_canvas_and_back() {
        let m = mapper();
        let canvas = m.to_canvas(NormalRect::new(200, 100, 400, 300));
        assert_eq!(canvas, Rect::new(100.0, 50.0, 200.0, 150.0));
        assert_eq!(m.to_normal(&canvas), NormalRect::new(200, 100, 400, 300));
    }

    #[test]
    fn test_to_normal_rounds_up() {
        let m = mapper();
        let normal = m.to_normal(&Rect::new(10.2, 10.0, 20.1, 0.3));
        assert_eq!(normal, NormalRect::new(21, 20, 41, 1));
    }

    #[test]
    fn test_clamp_x() {
        let m = mapper();
        assert_eq!(m.clamp_x(-5.0, 100.0), 0.0);
        assert_eq!(m.clamp_x(900.0, 100.0), 860.0);
        assert_eq!(m.clamp_x(100.0, 100.0), 100.0);
        // Wider than the canvas pins to the left edge.
        assert_eq!(m.clamp_x(10.0, 2000.0), 0.0);
    }

    #[test]
    fn test_clamp_y_has_floor() {
        let m = mapper();
        assert_eq!(m.clamp_y(-1.0, 10.0), 0.0);
        assert_eq!(m.clamp_y(535.0, 10.0), 530.0);
        assert_eq!(m.clamp_y(10.0, 1000.0), 0.0);
    }

    #[test]
    fn test_clamp_idempotent() {
        let m = mapper();
        let widths = [0.0, 1.0, 33.3, 480.0, 959.0, 960.0];
        let mut x = -200.0;
        while x < 1200.0 {
            for w in widths {
                let once = m.clamp_x(x, w);
                assert_eq!(m.clamp_x(once, w), once, "x={x} w={w}");
            }
            x += 7.25;
        }
    }

    #[test]
    fn test_clamp_y_idempotent() {
        let m = mapper();
        let heights = [0.0, 1.0, 27.7, 270.0, 539.0, 540.0, 800.0];
        let mut y = -150.0;
        while y < 800.0 {
            for h in heights {
                let once = m.clamp_y(y, h);
                assert_eq!(m.clamp_y(once, h), once, "y={y} h={h}");
                assert!(once >= 0.0, "y={y} h={h}");
            }
            y += 5.5;
        }
    }

    #[test]
    fn test_round_trip_on_odd_canvas_sizes() {
        for (cw, ch) in [(98.0, 28.0), (803.0, 451.0), (1366.0, 767.0)] {
            let m = CoordinateMapper::new(Size::new(1920.0, 1080.0), Size::new(cw, ch)).unwrap();
            for x in (0..1920).step_by(7) {
                for w in [1, 51, 102, 333, 1919] {
                    let y = x * 1080 / 1920;
                    let normal = NormalRect::new(x, y, w, w / 2);
                    assert_eq!(m.to_normal(&m.to_canvas(normal)), normal, "canvas {cw}x{ch}");
                }
            }
        }
    }

    #[test]
    fn test_clip_keeps_inner_edges() {
        let m = mapper();
        assert_eq!(m.clip(&Rect::new(-30.0, 10.0, 130.0, 50.0)), Rect::new(0.0, 10.0, 100.0, 50.0));
        assert_eq!(m.clip(&Rect::new(900.0, 500.0, 100.0, 100.0)), Rect::new(900.0, 500.0, 60.0, 40.0));
        assert_eq!(m.clip(&Rect::new(10.0, 10.0, 20.0, 20.0)), Rect::new(10.0, 10.0, 20.0, 20.0));
        // Entirely off the canvas collapses onto the edge.
        assert_eq!(m.clip(&Rect::new(-50.0, 0.0, 20.0, 20.0)), Rect::new(0.0, 0.0, 0.0, 20.0));
    }

    #[test]
    fn test_set_canvas_size_returns_previous() {
        let mut m = mapper();
        let old = m.set_canvas_size(480.0, 270.0);
        assert_eq!(old.width_ratio, 0.5);
        assert_eq!(m.proportion().width_ratio, 0.25);
        assert_eq!(m.canvas(), Size::new(480.0, 270.0));
    }
}

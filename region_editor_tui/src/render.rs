use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect as PixelRect;
use region_editor::{DrawOp, EditorConfig, Rect, RegionEditor, Size};

use crate::zones::ZoneFile;

const OUTLINE_COLOR: Rgba<u8> = Rgba([255, 48, 48, 255]);
const LABEL_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const HANDLE_COLOR: Rgba<u8> = Rgba([255, 210, 0, 255]);
/// Opacity of the black fill over shadowed regions.
const SHADE_ALPHA: f32 = 0.5;

fn pixel_rect(rect: &Rect) -> Option<PixelRect> {
    let width = rect.width.round();
    let height = rect.height.round();
    if width < 1.0 || height < 1.0 {
        return None;
    }
    Some(
        PixelRect::at(rect.x.round() as i32, rect.y.round() as i32)
            .of_size(width as u32, height as u32),
    )
}

fn shade(img: &mut RgbaImage, rect: &Rect) {
    let x0 = rect.x.floor().max(0.0) as u32;
    let y0 = rect.y.floor().max(0.0) as u32;
    let x1 = (rect.x + rect.width).ceil().clamp(0.0, img.width() as f32) as u32;
    let y1 = (rect.y + rect.height).ceil().clamp(0.0, img.height() as f32) as u32;
    for y in y0..y1 {
        for x in x0..x1 {
            let px = img.get_pixel_mut(x, y);
            for channel in px.0.iter_mut().take(3) {
                *channel = (*channel as f32 * (1.0 - SHADE_ALPHA)).round() as u8;
            }
        }
    }
}

/// Paint a display list onto `img`. Labels need a font; without one they are
/// skipped.
pub fn draw_scene(img: &mut RgbaImage, ops: &[DrawOp], font: Option<&FontVec>) {
    let mut skipped_labels = 0;
    for op in ops {
        match op {
            DrawOp::Outline(rect) => {
                if let Some(r) = pixel_rect(rect) {
                    draw_hollow_rect_mut(img, r, OUTLINE_COLOR);
                }
            }
            DrawOp::Shade(rect) => shade(img, rect),
            DrawOp::Handle(rect) => {
                if let Some(r) = pixel_rect(rect) {
                    draw_filled_rect_mut(img, r, HANDLE_COLOR);
                }
            }
            DrawOp::Label { x, y, text, size } => match font {
                Some(font) => draw_text_mut(
                    img,
                    LABEL_COLOR,
                    x.round() as i32,
                    y.round() as i32,
                    PxScale::from(*size),
                    font,
                    text,
                ),
                None => skipped_labels += 1,
            },
        }
    }
    if skipped_labels > 0 {
        log::warn!("{skipped_labels} labels not drawn, no font given");
    }
}

pub fn load_font(path: &Path) -> Result<FontVec> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read font {}", path.display()))?;
    FontVec::try_from_vec(bytes).with_context(|| format!("Failed to parse font {}", path.display()))
}

/// Draws the zones over an image and saves the result, next to the input
/// unless `output` is given.
#[tracing::instrument(skip(zones, config))]
pub fn render_zones(
    image_path: &Path,
    zones: &ZoneFile,
    config: &EditorConfig,
    motion: bool,
    output: Option<&Path>,
    font: Option<&Path>,
) -> Result<PathBuf> {
    let mut img = image::open(image_path)
        .with_context(|| format!("Failed to open image {}", image_path.display()))?
        .to_rgba8();
    let canvas = Size::new(img.width() as f32, img.height() as f32);

    let mut editor = RegionEditor::new(config, canvas)?;
    if motion {
        if !zones.apply_motion(&mut editor)? {
            log::warn!("Zone file has no motion grid, nothing to draw");
        }
    } else {
        zones.apply_masks(&mut editor)?;
    }

    let font = font.map(load_font).transpose()?;
    let scene = editor.scene();
    log::debug!("Drawing {} ops onto {}x{}", scene.len(), img.width(), img.height());
    draw_scene(&mut img, &scene, font.as_ref());

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| image_path.with_extension("zones.png"));
    img.save(&output)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    log::info!("Saved overlay to {}", output.display());
    Ok(output)
}

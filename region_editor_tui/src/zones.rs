use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use region_editor::{CodecError, EditorConfig, MotionGrid, NormalRect, RegionEditor};
use serde::{Deserialize, Serialize};

/// Device resolution the mask coordinates are expressed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reference {
    pub width: u32,
    pub height: u32,
}

/// One privacy mask or text label slot, in device coordinates. A slot with
/// zero width and height is unused.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaskEntry {
    pub enabled: bool,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub shadow: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MotionEntry {
    pub columns: usize,
    pub rows: usize,
    /// Hex encoded grid, one digit per four cells.
    pub map: String,
}

impl MotionEntry {
    /// An all-off grid.
    pub fn blank(columns: usize, rows: usize) -> Result<Self, CodecError> {
        let grid = MotionGrid::new(columns, rows)?;
        Ok(Self {
            columns,
            rows,
            map: grid.encode(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoneFile {
    pub reference: Reference,
    #[serde(default)]
    pub masks: Vec<MaskEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<MotionEntry>,
}

impl ZoneFile {
    pub fn empty(config: &EditorConfig) -> Self {
        Self {
            reference: Reference {
                width: config.reference_width as u32,
                height: config.reference_height as u32,
            },
            masks: Vec::new(),
            motion: None,
        }
    }

    /// Append unused, enabled slots until there are at least `slots` masks.
    pub fn pad_slots(&mut self, slots: usize) {
        if self.masks.len() < slots {
            self.masks.resize_with(slots, || MaskEntry {
                enabled: true,
                ..Default::default()
            });
        }
    }

    /// Load the masks into `editor`, replacing whatever it held.
    pub fn apply_masks(&self, editor: &mut RegionEditor) -> Result<()> {
        editor
            .init_drawer(self.reference.width as f32, self.reference.height as f32)
            .context("Invalid reference resolution in zone file")?;
        for mask in &self.masks {
            editor.push_normal(
                mask.enabled,
                NormalRect::new(mask.x, mask.y, mask.width, mask.height),
                mask.label.as_deref().unwrap_or_default(),
                mask.shadow,
            );
        }
        log::info!("Loaded {} mask slots", self.masks.len());
        Ok(())
    }

    /// Load the motion grid into `editor`. Returns false when the file has
    /// no motion section.
    pub fn apply_motion(&self, editor: &mut RegionEditor) -> Result<bool> {
        let Some(motion) = &self.motion else {
            return Ok(false);
        };
        editor
            .init_motion(motion.columns, motion.rows, &motion.map)
            .with_context(|| {
                format!(
                    "Invalid motion map for a {}x{} grid",
                    motion.columns, motion.rows
                )
            })?;
        log::info!("Loaded {}x{} motion grid", motion.columns, motion.rows);
        Ok(true)
    }

    /// Read the editor's current regions back into the file.
    pub fn capture(&mut self, editor: &mut RegionEditor) {
        if let Some(map) = editor.motion_string() {
            if let Some(motion) = self.motion.as_mut() {
                motion.map = map;
            }
            return;
        }

        let mut masks = Vec::with_capacity(editor.store().len());
        for index in 0..editor.store().len() {
            let Some(rect) = editor.region_normal(index) else {
                continue;
            };
            let Some(region) = editor.store().get(index) else {
                continue;
            };
            masks.push(MaskEntry {
                enabled: region.enabled,
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                label: (!region.content.is_empty()).then(|| region.content.clone()),
                shadow: region.shadow,
            });
        }
        self.masks = masks;
    }
}

/// Save zones to a JSON file
pub fn save_zones(path: &Path, zones: &ZoneFile) -> Result<()> {
    let json = serde_json::to_string_pretty(zones).context("Failed to serialize zones to JSON")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write zone file {}", path.display()))?;
    Ok(())
}

/// Load zones from a JSON file. A missing file is an empty document.
pub fn load_zones(path: &Path, config: &EditorConfig) -> Result<ZoneFile> {
    if !path.exists() {
        log::info!("{} does not exist yet, starting empty", path.display());
        return Ok(ZoneFile::empty(config));
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read zone file {}", path.display()))?;
    let zones: ZoneFile = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse zone file {}", path.display()))?;
    Ok(zones)
}

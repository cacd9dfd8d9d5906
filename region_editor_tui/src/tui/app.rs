use std::path::PathBuf;

use anyhow::Result;
use region_editor::layout::Resolution;
use region_editor::{DragState, EditorConfig, PointerEvent, RegionEditor, Size};

use crate::zones::{save_zones, MotionEntry, ZoneFile};

/// Sent by the loader thread once the zone file has been read.
#[derive(Debug, Clone)]
pub enum TuiMessage {
    Loaded(ZoneFile),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TuiMode {
    Loading,
    Mask,
    Motion,
}

#[derive(Debug, Clone)]
pub struct EditOptions {
    pub zones_path: PathBuf,
    /// Start on the motion grid instead of the masks.
    pub motion: bool,
    /// Mask slots offered for drawing.
    pub slots: usize,
    /// Grid used when the file has no motion section yet.
    pub columns: usize,
    pub rows: usize,
}

pub struct App {
    pub editor: RegionEditor,
    pub zones: ZoneFile,
    pub tui_mode: TuiMode,
    pub status: String,
    pub dirty: bool,
    options: EditOptions,
    should_quit: bool,
}

impl App {
    pub fn new(config: &EditorConfig, options: EditOptions) -> Result<Self> {
        // The canvas size is only known after the first draw.
        let editor = RegionEditor::new(config, Size::new(0.0, 0.0))?;
        Ok(Self {
            editor,
            zones: ZoneFile::empty(config),
            tui_mode: TuiMode::Loading,
            status: format!("Loading {}...", options.zones_path.display()),
            dirty: false,
            options,
            should_quit: false,
        })
    }

    pub fn update(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Loaded(zones) => {
                self.zones = zones;
                self.zones.pad_slots(self.options.slots);
                if self.options.motion {
                    self.enter_motion();
                } else {
                    self.enter_mask();
                }
            }
            TuiMessage::Error(err) => {
                log::error!("Loading zones failed: {err}");
                self.status = format!("Error: {err}");
            }
        }
    }

    /// Height over width of the device picture.
    pub fn aspect(&self) -> f32 {
        Resolution {
            width: self.zones.reference.width.max(1),
            height: self.zones.reference.height.max(1),
        }
        .aspect()
    }

    fn enter_mask(&mut self) {
        match self.zones.apply_masks(&mut self.editor) {
            Ok(()) => {
                self.tui_mode = TuiMode::Mask;
                self.status = format!("{} mask slots", self.zones.masks.len());
            }
            Err(e) => self.status = format!("Error: {e:#}"),
        }
    }

    fn enter_motion(&mut self) {
        if self.zones.motion.is_none() {
            match MotionEntry::blank(self.options.columns, self.options.rows) {
                Ok(blank) => self.zones.motion = Some(blank),
                Err(e) => {
                    self.status = format!("Error: {e}");
                    return;
                }
            }
        }
        let grid = match &self.zones.motion {
            Some(motion) => format!("{}x{} motion grid", motion.columns, motion.rows),
            None => return,
        };
        match self.zones.apply_motion(&mut self.editor) {
            Ok(_) => {
                self.tui_mode = TuiMode::Motion;
                self.status = grid;
            }
            Err(e) => self.status = format!("Error: {e:#}"),
        }
    }

    /// Switch between masks and the motion grid, keeping the edits made so far.
    pub fn toggle_mode(&mut self) {
        match self.tui_mode {
            TuiMode::Loading => {}
            TuiMode::Mask => {
                self.zones.capture(&mut self.editor);
                self.enter_motion();
            }
            TuiMode::Motion => {
                self.zones.capture(&mut self.editor);
                self.enter_mask();
            }
        }
    }

    /// Follow the canvas widget's size in terminal cells.
    pub fn resize_canvas(&mut self, width: u16, height: u16) {
        // A terminal too small for the picture keeps the last usable size.
        if width == 0 || height == 0 {
            return;
        }
        let canvas = self.editor.mapper().canvas();
        if canvas.width != width as f32 || canvas.height != height as f32 {
            self.editor.resize_canvas(width as f32, height as f32);
        }
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        if self.tui_mode == TuiMode::Loading {
            return;
        }
        let dragging = self.editor.state() != DragState::Idle;
        self.editor.handle_pointer(event);
        if dragging && matches!(event, PointerEvent::Move(_)) {
            self.dirty = true;
        }
    }

    pub fn toggle_drawing(&mut self) {
        let armed = self.editor.toggle_drawing();
        self.status = if armed {
            "Drawing: drag on the picture".to_string()
        } else {
            "Drawing off".to_string()
        };
    }

    pub fn delete_all(&mut self) {
        if self.tui_mode == TuiMode::Loading {
            return;
        }
        self.editor.delete_all();
        self.dirty = true;
        self.status = "Cleared".to_string();
    }

    pub fn fill_whole(&mut self) {
        if self.tui_mode != TuiMode::Mask {
            return;
        }
        if self.editor.fill_whole() {
            self.dirty = true;
            self.status = "First mask covers the whole picture".to_string();
        }
    }

    pub fn save(&mut self) {
        if self.tui_mode == TuiMode::Loading {
            return;
        }
        self.zones.capture(&mut self.editor);
        match save_zones(&self.options.zones_path, &self.zones) {
            Ok(()) => {
                self.dirty = false;
                self.status = format!("Saved {}", self.options.zones_path.display());
                log::info!("Saved zones to {}", self.options.zones_path.display());
            }
            Err(e) => {
                log::error!("Saving zones failed: {e:#}");
                self.status = format!("Error: {e:#}");
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

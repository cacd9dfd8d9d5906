//! Pointer driven editing of mask regions and motion grids.
//!
//! [`RegionEditor`] owns the coordinate mapper, the region store and the
//! drag state. Callers translate their toolkit's mouse events into
//! [`PointerEvent`]s with canvas-relative coordinates and repaint from
//! [`RegionEditor::scene`] afterwards. Edits are applied live while the
//! pointer moves; releasing the pointer only ends the gesture.

use crate::config::{EditorConfig, ExitMargins};
use crate::coords::{CoordinateMapper, Proportion};
use crate::error::EditorError;
use crate::geometry::{NormalRect, Point, Rect, Size};
use crate::handles::{Handle, HandleSet};
use crate::hit::{hit_handle, hit_region};
use crate::label::LabelMetrics;
use crate::motion::{self, MotionGrid, SelectionRule};
use crate::region::{Region, RegionPatch};
use crate::scene::{DrawOp, LABEL_INSET};
use crate::store::RegionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// Free-form mask and label regions.
    Mask,
    /// A fixed grid of cells, switched on by dragging across them.
    Motion(MotionGrid),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Growing the empty slot claimed at pointer-down.
    Drawing { slot: usize },
    Moving { index: usize },
    Resizing { index: usize, handle: Handle },
    MotionSelecting { origin: Point },
}

/// Pointer input in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
}

#[derive(Debug, Clone)]
pub struct RegionEditor {
    mapper: CoordinateMapper,
    store: RegionStore,
    labels: LabelMetrics,
    mode: EditorMode,
    state: DragState,
    active: Option<usize>,
    handles: Option<HandleSet>,
    last: Point,
    drawing_armed: bool,
    handles_enabled: bool,
    move_enabled: bool,
    selection_rule: SelectionRule,
    exit_margins: ExitMargins,
}

impl RegionEditor {
    pub fn new(config: &EditorConfig, canvas: Size) -> Result<Self, EditorError> {
        Ok(Self {
            mapper: CoordinateMapper::new(config.reference(), canvas)?,
            store: RegionStore::new(),
            labels: LabelMetrics::new(config.char_length),
            mode: EditorMode::Mask,
            state: DragState::Idle,
            active: None,
            handles: None,
            last: Point::default(),
            drawing_armed: false,
            handles_enabled: config.handles_enabled,
            move_enabled: config.move_enabled,
            selection_rule: config.selection_rule,
            exit_margins: config.exit_margins,
        })
    }

    pub fn store(&self) -> &RegionStore {
        &self.store
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn proportion(&self) -> Proportion {
        self.mapper.proportion()
    }

    pub fn labels(&self) -> &LabelMetrics {
        &self.labels
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_motion(&self) -> bool {
        matches!(self.mode, EditorMode::Motion(_))
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn handles(&self) -> Option<&HandleSet> {
        self.handles.as_ref()
    }

    pub fn drawing_armed(&self) -> bool {
        self.drawing_armed
    }

    pub fn set_drawing(&mut self, armed: bool) {
        self.drawing_armed = armed;
    }

    pub fn toggle_drawing(&mut self) -> bool {
        self.drawing_armed = !self.drawing_armed;
        self.drawing_armed
    }

    pub fn set_handles_enabled(&mut self, enabled: bool) {
        self.handles_enabled = enabled;
    }

    pub fn set_move_enabled(&mut self, enabled: bool) {
        self.move_enabled = enabled;
    }

    pub fn set_selection_rule(&mut self, rule: SelectionRule) {
        self.selection_rule = rule;
    }

    /// Start a mask session against a device resolution. Drops all regions.
    pub fn init_drawer(&mut self, normal_width: f32, normal_height: f32) -> Result<(), EditorError> {
        self.mapper.set_reference(normal_width, normal_height)?;
        self.mode = EditorMode::Mask;
        self.reset();
        Ok(())
    }

    /// Start a motion session from the device's hex map. On error the editor
    /// is left untouched.
    pub fn init_motion(&mut self, x_count: usize, y_count: usize, hex: &str) -> Result<(), EditorError> {
        let grid = MotionGrid::decode(hex, x_count, y_count)?;
        let canvas = self.mapper.canvas();
        // Motion cells live in canvas space.
        self.mapper.set_reference(canvas.width, canvas.height)?;
        self.reset();
        for region in grid.to_regions(canvas) {
            self.store.push(region);
        }
        log::debug!(
            "motion grid {}x{} ({} padded columns) loaded",
            grid.requested_columns(),
            grid.rows(),
            grid.columns()
        );
        self.mode = EditorMode::Motion(grid);
        Ok(())
    }

    /// Current motion map in wire format, `None` outside motion mode.
    pub fn motion_string(&self) -> Option<String> {
        self.motion_grid().map(|grid| grid.encode())
    }

    pub fn motion_grid(&self) -> Option<MotionGrid> {
        match &self.mode {
            EditorMode::Motion(grid) => {
                let mut grid = grid.clone();
                grid.sync_from(&self.store);
                Some(grid)
            }
            EditorMode::Mask => None,
        }
    }

    fn reset(&mut self) {
        self.store.clear();
        self.state = DragState::Idle;
        self.active = None;
        self.handles = None;
    }

    /// Add a region given in device coordinates.
    pub fn push_normal(&mut self, enabled: bool, rect: NormalRect, content: &str, shadow: bool) -> usize {
        let scaled = self.mapper.to_canvas(rect);
        let placed = Rect::new(
            self.mapper.clamp_x(scaled.x, scaled.width),
            self.mapper.clamp_y(scaled.y, scaled.height),
            scaled.width,
            scaled.height,
        );
        self.store.push(
            Region::new(enabled, placed)
                .with_content(content)
                .with_shadow(shadow),
        )
    }

    /// Add a text region at a device position, sized from its content.
    pub fn push_label(&mut self, enabled: bool, x: u32, y: u32, content: &str, shadow: bool) -> usize {
        let p = self.mapper.proportion();
        let width = self.labels.content_width(content).min(self.mapper.canvas().width);
        let height = self.labels.content_height();
        let rect = Rect::new(
            self.mapper.clamp_x(x as f32 * p.width_ratio, width),
            self.mapper.clamp_y(y as f32 * p.height_ratio, height),
            width,
            height,
        );
        self.store.push(
            Region::new(enabled, rect)
                .with_content(content)
                .with_shadow(shadow),
        )
    }

    /// Replace a label's text, refitting its width within the canvas.
    pub fn set_label(&mut self, index: usize, content: &str) -> bool {
        let width = self.labels.content_width(content).min(self.mapper.canvas().width);
        let Some(region) = self.store.get(index) else {
            log::error!("set_label: region {index} does not exist");
            return false;
        };
        let x = self.mapper.clamp_x(region.x, width);
        self.set(
            index,
            RegionPatch {
                content: Some(content.to_string()),
                width: Some(width),
                x: Some(x),
                ..Default::default()
            },
        )
    }

    /// Change the label font size, given in device pixels.
    pub fn set_font_size(&mut self, size: f32) {
        self.labels
            .set_font_size(size, self.mapper.proportion().height_ratio);
        let labels = self.labels;
        for region in self.store.iter_mut().filter(|r| !r.content.is_empty()) {
            region.height = labels.content_height();
            region.width = labels.content_width(&region.content);
        }
        self.refresh_handles();
    }

    pub fn max_content_len(&self) -> usize {
        self.labels.max_content_len(
            self.mapper.canvas().width,
            self.mapper.proportion().width_ratio,
        )
    }

    /// Set a region's width from a device-space value.
    pub fn set_width(&mut self, index: usize, normal_width: f32) -> bool {
        let width = normal_width * self.mapper.proportion().width_ratio;
        self.set(
            index,
            RegionPatch {
                width: Some(width),
                ..Default::default()
            },
        )
    }

    pub fn set(&mut self, index: usize, patch: RegionPatch) -> bool {
        let applied = self.store.set(index, patch);
        if applied && self.active == Some(index) {
            self.refresh_handles();
        }
        applied
    }

    /// Device-space rectangle of a region, normalizing it in place first.
    pub fn region_normal(&mut self, index: usize) -> Option<NormalRect> {
        let rect = self.store.normalize(index)?.rect();
        if self.active == Some(index) {
            self.refresh_handles();
        }
        Some(self.mapper.to_normal(&rect))
    }

    /// Motion mode switches every cell off; mask mode empties every slot.
    pub fn delete_all(&mut self) {
        if self.is_motion() {
            self.store.disable_all();
        } else {
            self.store.vacate_all();
            self.handles = None;
            self.active = None;
        }
        self.state = DragState::Idle;
    }

    /// Stretch the first region over the whole canvas.
    pub fn fill_whole(&mut self) -> bool {
        let canvas = self.mapper.canvas();
        let Some(first) = self.store.get_mut(0) else {
            return false;
        };
        first.set_rect(Rect::new(0.0, 0.0, canvas.width, canvas.height));
        if self.active == Some(0) {
            self.refresh_handles();
        }
        true
    }

    /// Follow a canvas resize: every region keeps its relative placement and
    /// the handles are rebuilt before anything can paint them.
    ///
    /// Sizes that are not positive and finite are ignored.
    pub fn resize_canvas(&mut self, width: f32, height: f32) {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            log::debug!("ignoring canvas resize to {width}x{height}");
            return;
        }
        let old = self.mapper.set_canvas_size(width, height);
        let new = self.mapper.proportion();
        self.store.rescale(old, new);
        self.refresh_handles();
        log::debug!("canvas resized to {width}x{height}");
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up => self.finish_drag(),
        }
    }

    fn pointer_down(&mut self, p: Point) {
        self.last = p;

        if self.is_motion() {
            self.state = if self.drawing_armed {
                DragState::MotionSelecting { origin: p }
            } else {
                DragState::Idle
            };
            return;
        }

        if self.handles_enabled {
            if let (Some(index), Some(handle)) = (self.active, hit_handle(self.handles.as_ref(), p)) {
                self.state = DragState::Resizing { index, handle };
                log::debug!("resizing region {index} by {handle:?}");
                return;
            }
        }

        self.active = hit_region(&self.store, p);
        if let Some(index) = self.active {
            if self.move_enabled {
                self.refresh_handles();
                self.state = DragState::Moving { index };
                return;
            }
        }

        if self.drawing_armed {
            if let Some(slot) = self.store.find_first_empty() {
                if let Some(region) = self.store.get_mut(slot) {
                    region.x = p.x;
                    region.y = p.y;
                }
                self.active = Some(slot);
                self.refresh_handles();
                self.state = DragState::Drawing { slot };
                log::debug!("drawing into slot {slot}");
                return;
            }
            log::debug!("no empty slot left to draw into");
        }

        self.active = None;
        self.handles = None;
        self.state = DragState::Idle;
    }

    fn pointer_move(&mut self, p: Point) {
        if self.state == DragState::Idle {
            return;
        }
        let dx = p.x - self.last.x;
        let dy = p.y - self.last.y;
        self.last = p;

        match self.state {
            DragState::Idle => {}
            DragState::Drawing { slot } => {
                if let Some(region) = self.store.get_mut(slot) {
                    region.width += dx;
                    region.height += dy;
                }
                self.refresh_handles();
            }
            DragState::Resizing { index, handle } => {
                if let Some(handles) = self.handles.as_mut() {
                    handles.drag(handle, dx, dy);
                    let placed = self.mapper.clip(&handles.bounds());
                    if let Some(region) = self.store.get_mut(index) {
                        region.set_rect(placed);
                    }
                }
                self.refresh_handles();
            }
            DragState::Moving { index } => {
                if let Some(region) = self.store.get_mut(index) {
                    region.x = self.mapper.clamp_x(region.x + dx, region.width);
                    region.y = self.mapper.clamp_y(region.y + dy, region.height);
                }
                self.refresh_handles();
            }
            DragState::MotionSelecting { origin } => {
                motion::select_cells(&mut self.store, origin, p, self.selection_rule);
            }
        }

        if self.exit_margins.is_outside(p, self.mapper.canvas()) {
            log::debug!("pointer left the canvas at ({}, {}), dropping drag", p.x, p.y);
            self.finish_drag();
        }
    }

    fn finish_drag(&mut self) {
        if let DragState::Drawing { slot } = self.state {
            if let Some(region) = self.store.get_mut(slot) {
                region.normalize();
                region.x = self.mapper.clamp_x(region.x, region.width);
                region.y = self.mapper.clamp_y(region.y, region.height);
            }
            self.refresh_handles();
        }
        self.state = DragState::Idle;
    }

    fn refresh_handles(&mut self) {
        self.handles = match self.mode {
            EditorMode::Mask => self
                .active
                .and_then(|i| self.store.get(i))
                .map(|region| HandleSet::from_rect(&region.rect())),
            EditorMode::Motion(_) => None,
        };
    }

    /// What to paint for the current state, back to front.
    pub fn scene(&self) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        if self.is_motion() {
            ops.extend(
                self.store
                    .iter()
                    .filter(|cell| cell.enabled)
                    .map(|cell| DrawOp::Outline(cell.rect())),
            );
            return ops;
        }

        for region in &self.store {
            if !region.enabled || region.width == 0.0 || region.height == 0.0 {
                continue;
            }
            let rect = region.rect().normalized();
            ops.push(DrawOp::Outline(rect));
            if !region.content.is_empty() {
                ops.push(DrawOp::Label {
                    x: rect.x + LABEL_INSET,
                    y: rect.y + LABEL_INSET,
                    text: region.content.clone(),
                    size: self.labels.char_length,
                });
            }
            if region.shadow {
                ops.push(DrawOp::Shade(rect));
            }
        }

        if self.handles_enabled && self.active.is_some() {
            if let Some(handles) = &self.handles {
                ops.extend(handles.squares().into_iter().map(DrawOp::Handle));
            }
        }
        ops
    }
}

//! Application state for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::cell::Cell;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use formloom_drag::{DragSession, DragState, DropAction};
use formloom_ids::FieldId;
use formloom_schema::model::{FieldDefinition, FieldKind, FormSchema};

use super::TuiArgs;

#[path = "views/palette.rs"]
mod palette;

#[path = "views/canvas.rs"]
mod canvas;

#[path = "views/settings.rs"]
mod settings;

#[path = "views/preview.rs"]
mod preview;

/// Current TUI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TuiMode {
    #[default]
    Build, // Palette + canvas editing
    Preview, // Fill the form as a respondent would
}

impl TuiMode {
    pub fn label(self) -> &'static str {
        match self {
            TuiMode::Build => "Build",
            TuiMode::Preview => "Preview",
        }
    }
}

/// Focus area within the build screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuilderFocus {
    #[default]
    Palette,
    Canvas,
}

impl BuilderFocus {
    pub fn toggled(self) -> Self {
        match self {
            BuilderFocus::Palette => BuilderFocus::Canvas,
            BuilderFocus::Canvas => BuilderFocus::Palette,
        }
    }
}

/// Build-screen cursors and transient flags
#[derive(Debug, Clone, Default)]
pub struct BuilderState {
    pub focus: BuilderFocus,
    pub palette_selected: usize,
    pub canvas_selected: usize,
    pub confirm_clear: bool,
}

/// One editable row of the settings panel.
///
/// Which rows appear depends on the field kind: a date field has no
/// placeholder row, a text field no options row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Label,
    Name,
    Placeholder,
    Required,
    ColumnWidth,
    Options,
    Content,
}

impl SettingsRow {
    pub fn rows_for(kind: FieldKind) -> Vec<SettingsRow> {
        let mut rows = vec![SettingsRow::Label, SettingsRow::Name];
        if kind.has_placeholder() {
            rows.push(SettingsRow::Placeholder);
        }
        rows.push(SettingsRow::Required);
        rows.push(SettingsRow::ColumnWidth);
        if kind.has_options() {
            rows.push(SettingsRow::Options);
        }
        if kind.has_content() {
            rows.push(SettingsRow::Content);
        }
        rows
    }

    pub fn title(self) -> &'static str {
        match self {
            SettingsRow::Label => "Label",
            SettingsRow::Name => "Field name",
            SettingsRow::Placeholder => "Placeholder",
            SettingsRow::Required => "Required",
            SettingsRow::ColumnWidth => "Column width",
            SettingsRow::Options => "Options",
            SettingsRow::Content => "Content",
        }
    }

    /// Rows edited through a text buffer, as opposed to toggled or cycled.
    pub fn is_text(self) -> bool {
        !matches!(self, SettingsRow::Required | SettingsRow::ColumnWidth)
    }
}

/// Field settings editor over a working copy of one field.
///
/// Edits accumulate on `field` and reach the schema only on save, so closing
/// the panel with Esc discards everything.
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    pub field: FieldDefinition,
    pub row: usize,
    /// In-flight text buffer for the focused row, when editing.
    pub editing: Option<String>,
}

impl SettingsPanel {
    pub fn open(field: FieldDefinition) -> Self {
        Self {
            field,
            row: 0,
            editing: None,
        }
    }

    pub fn rows(&self) -> Vec<SettingsRow> {
        SettingsRow::rows_for(self.field.kind)
    }

    pub fn focused_row(&self) -> SettingsRow {
        let rows = self.rows();
        rows[self.row.min(rows.len() - 1)]
    }

    /// Current textual value of a row, also the seed for its edit buffer.
    pub fn value_of(&self, row: SettingsRow) -> String {
        match row {
            SettingsRow::Label => self.field.label.clone(),
            SettingsRow::Name => self.field.name.clone(),
            SettingsRow::Placeholder => self.field.placeholder.clone().unwrap_or_default(),
            SettingsRow::Required => if self.field.required { "yes" } else { "no" }.to_string(),
            SettingsRow::ColumnWidth => self.field.column_width.as_str().to_string(),
            SettingsRow::Options => self.field.options.join("\n"),
            SettingsRow::Content => self.field.content.clone().unwrap_or_default(),
        }
    }

    /// Write an edit buffer back into the working copy.
    pub fn commit(&mut self, row: SettingsRow, buffer: String) {
        match row {
            SettingsRow::Label => self.field.label = buffer,
            SettingsRow::Name => {
                let trimmed = buffer.trim();
                if !trimmed.is_empty() {
                    self.field.name = trimmed.to_string();
                }
            }
            SettingsRow::Placeholder => {
                let trimmed = buffer.trim();
                self.field.placeholder = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                };
            }
            SettingsRow::Options => {
                self.field.options = buffer
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect();
            }
            SettingsRow::Content => {
                let trimmed = buffer.trim();
                self.field.content = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                };
            }
            SettingsRow::Required | SettingsRow::ColumnWidth => {}
        }
    }
}

/// A respondent's answer to one field in preview mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillValue {
    /// Free text, also used for dates, times and file names
    Text(String),
    /// Chosen option value of a select or radio group
    Choice(String),
    /// Checked option values of a checkbox group, in check order
    Checks(Vec<String>),
    /// Acceptance checkbox state
    Accepted(bool),
}

impl FillValue {
    /// Human-readable form, mapping option values back to their labels.
    pub fn display(&self, field: &FieldDefinition) -> String {
        match self {
            FillValue::Text(text) => text.clone(),
            FillValue::Choice(value) => field
                .option_pairs()
                .into_iter()
                .find(|pair| &pair.value == value)
                .map(|pair| pair.label)
                .unwrap_or_else(|| value.clone()),
            FillValue::Checks(values) => {
                let pairs = field.option_pairs();
                values
                    .iter()
                    .map(|value| {
                        pairs
                            .iter()
                            .find(|pair| &pair.value == value)
                            .map(|pair| pair.label.clone())
                            .unwrap_or_else(|| value.clone())
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            }
            FillValue::Accepted(true) => "Yes".to_string(),
            FillValue::Accepted(false) => "No".to_string(),
        }
    }
}

/// Fill state of preview mode, keyed by field id so it survives mode
/// toggles and field reordering.
#[derive(Debug, Clone, Default)]
pub struct PreviewState {
    pub selected: usize,
    pub values: HashMap<FieldId, FillValue>,
    /// Cursor within a checkbox group's options
    pub option_cursor: usize,
    pub editing: bool,
    pub input: String,
    pub submitted: bool,
}

/// Global status message shown in the action bar.
#[derive(Debug, Clone)]
pub struct GlobalStatusMessage {
    pub message: String,
    pub is_error: bool,
    pub expires_at: Instant,
}

/// Application state
pub struct App {
    pub running: bool,
    pub mode: TuiMode,
    pub schema: FormSchema,
    pub drag: DragSession,
    pub builder: BuilderState,
    pub settings: Option<SettingsPanel>,
    pub preview: PreviewState,
    pub show_help: bool,
    pub global_status: Option<GlobalStatusMessage>,
    pub tick_count: u64,
    /// Palette inner area from the last render, for mouse hit tests
    pub layout_palette: Cell<Rect>,
    /// Canvas inner area from the last render, for mouse hit tests
    pub layout_canvas: Cell<Rect>,
}

impl App {
    pub fn new(args: TuiArgs) -> Self {
        let mut schema = FormSchema::initial();
        if let Some(name) = args.form_name {
            schema.name = name;
        }

        Self {
            running: true,
            mode: TuiMode::default(),
            schema,
            drag: DragSession::new(),
            builder: BuilderState::default(),
            settings: None,
            preview: PreviewState::default(),
            show_help: false,
            global_status: None,
            tick_count: 0,
            layout_palette: Cell::new(Rect::default()),
            layout_canvas: Cell::new(Rect::default()),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Periodic tick for animations and status expiry
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);

        if let Some(status) = &self.global_status {
            if status.expires_at <= Instant::now() {
                self.global_status = None;
            }
        }
    }

    pub fn set_global_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.set_global_status_for(message, is_error, Duration::from_secs(3));
    }

    pub fn set_global_status_for(
        &mut self,
        message: impl Into<String>,
        is_error: bool,
        duration: Duration,
    ) {
        self.global_status = Some(GlobalStatusMessage {
            message: message.into(),
            is_error,
            expires_at: Instant::now() + duration,
        });
    }

    pub fn in_text_input_mode(&self) -> bool {
        if self.settings.as_ref().is_some_and(|panel| panel.editing.is_some()) {
            return true;
        }
        self.mode == TuiMode::Preview && self.preview.editing
    }

    /// Handle key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // The settings panel captures all input while open.
        if self.settings.is_some() {
            self.handle_settings_key(key);
            return;
        }

        if self.show_help {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        if self.builder.confirm_clear {
            self.handle_confirm_clear_key(key);
            return;
        }

        // Global keys - always active
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit();
                return;
            }
            KeyCode::Char('q') if !self.in_text_input_mode() => {
                self.quit();
                return;
            }
            KeyCode::Char('?') if !self.in_text_input_mode() => {
                self.show_help = true;
                return;
            }
            KeyCode::Char('p') if !self.in_text_input_mode() && !self.drag.is_dragging() => {
                self.toggle_preview();
                return;
            }
            KeyCode::Char('b') if self.mode == TuiMode::Preview && !self.in_text_input_mode() => {
                self.mode = TuiMode::Build;
                return;
            }
            _ => {}
        }

        match self.mode {
            TuiMode::Build => self.handle_build_key(key),
            TuiMode::Preview => self.handle_preview_key(key),
        }
    }

    fn handle_build_key(&mut self, key: KeyEvent) {
        if self.drag.is_dragging() {
            self.handle_drag_key(key);
            return;
        }

        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.builder.focus = self.builder.focus.toggled();
            return;
        }

        match self.builder.focus {
            BuilderFocus::Palette => self.handle_palette_key(key),
            BuilderFocus::Canvas => self.handle_canvas_key(key),
        }
    }

    /// Keys while a drag is in flight: move the hover gap, drop, or cancel.
    fn handle_drag_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let gap = self.drag.hover().unwrap_or(0);
                self.drag = self.drag.hover_gap(gap.saturating_sub(1));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let gap = self.drag.hover().unwrap_or(0);
                self.drag = self.drag.hover_gap((gap + 1).min(self.schema.len()));
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let (session, action) = self.drag.drop_on_hover();
                self.drag = session;
                if let Some(action) = action {
                    self.apply_drop(action);
                }
            }
            KeyCode::Esc => {
                self.drag = self.drag.cancel();
            }
            _ => {}
        }
    }

    /// Apply a completed drop to the schema and land the selection on the
    /// affected field.
    pub fn apply_drop(&mut self, action: DropAction) {
        match action {
            DropAction::InsertNew { index, kind } => {
                self.schema = self.schema.insert_field(index, kind);
                self.builder.focus = BuilderFocus::Canvas;
                self.builder.canvas_selected = index.min(self.schema.len().saturating_sub(1));
                self.set_global_status(format!("Added {}", kind.label()), false);
                info!(kind = kind.as_str(), index, "field inserted");
            }
            DropAction::MoveExisting { from, to } => {
                let moved = self.schema.fields.get(from).map(|f| f.id.clone());
                self.schema = self.schema.move_field(from, to);
                if let Some(position) = moved.and_then(|id| self.schema.position(&id)) {
                    self.builder.canvas_selected = position;
                }
                info!(from, to, "field moved");
            }
        }
    }

    /// Handle mouse event: press to grab, drag to hover, release to drop.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.mode != TuiMode::Build
            || self.settings.is_some()
            || self.show_help
            || self.builder.confirm_clear
        {
            return;
        }

        let palette = self.layout_palette.get();
        let canvas = self.layout_canvas.get();
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if palette.contains(position) {
                    let row = (mouse.row - palette.y) as usize;
                    if row < FieldKind::ALL.len() {
                        self.builder.focus = BuilderFocus::Palette;
                        self.builder.palette_selected = row;
                        self.begin_palette_grab();
                    }
                } else if canvas.contains(position) {
                    let row = (mouse.row - canvas.y) as usize
                        + self.canvas_scroll(canvas.height as usize);
                    if let Some(index) = self.field_at_visual_row(row) {
                        self.builder.focus = BuilderFocus::Canvas;
                        self.builder.canvas_selected = index;
                        self.begin_canvas_grab();
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if !self.drag.is_dragging() {
                    return;
                }
                if canvas.contains(position) {
                    let row = (mouse.row - canvas.y) as usize
                        + self.canvas_scroll(canvas.height as usize);
                    self.drag = self.drag.hover_gap(self.gap_at_visual_row(row));
                } else {
                    self.drag = self.drag.clear_hover();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.drag.is_dragging() {
                    let (session, action) = self.drag.drop_on_hover();
                    self.drag = session;
                    if let Some(action) = action {
                        self.apply_drop(action);
                    }
                }
            }
            MouseEventKind::ScrollUp if canvas.contains(position) => {
                self.builder.focus = BuilderFocus::Canvas;
                self.builder.canvas_selected = self.builder.canvas_selected.saturating_sub(1);
            }
            MouseEventKind::ScrollDown if canvas.contains(position) => {
                if !self.schema.is_empty() {
                    self.builder.canvas_selected =
                        (self.builder.canvas_selected + 1).min(self.schema.len() - 1);
                    self.builder.focus = BuilderFocus::Canvas;
                }
            }
            _ => {}
        }
    }

    pub fn toggle_preview(&mut self) {
        match self.mode {
            TuiMode::Build => {
                if self.schema.is_empty() {
                    self.set_global_status("Add a field before previewing", true);
                    return;
                }
                self.preview.selected = self.preview.selected.min(self.schema.len() - 1);
                self.preview.option_cursor = 0;
                self.preview.editing = false;
                self.preview.submitted = false;
                self.mode = TuiMode::Preview;
            }
            TuiMode::Preview => {
                self.mode = TuiMode::Build;
            }
        }
    }

    // ------------------------------------------------------------------
    // Canvas row geometry
    //
    // While a drag is in flight the canvas shows one extra row: the ghost
    // marking the hover gap. Visual rows and field indices diverge below
    // the ghost, and these helpers convert between them.
    // ------------------------------------------------------------------

    /// Gap the ghost row occupies, while a drag is in flight with a hover.
    pub fn ghost_gap(&self) -> Option<usize> {
        if self.drag.is_dragging() {
            self.drag.hover()
        } else {
            None
        }
    }

    /// Kind rendered inside the ghost row.
    pub fn ghost_kind(&self) -> Option<FieldKind> {
        match self.drag.state() {
            DragState::DraggingNew(kind) => Some(kind),
            DragState::DraggingExisting(index) => self.schema.fields.get(index).map(|f| f.kind),
            DragState::Idle => None,
        }
    }

    /// Number of rows the canvas list renders.
    pub fn canvas_row_count(&self) -> usize {
        self.schema.len() + usize::from(self.ghost_gap().is_some())
    }

    /// Gap targeted by pointing at a visual row.
    pub fn gap_at_visual_row(&self, row: usize) -> usize {
        let gap = match self.ghost_gap() {
            Some(ghost) if row > ghost => row - 1,
            _ => row,
        };
        gap.min(self.schema.len())
    }

    /// Field index rendered at a visual row, `None` on the ghost row.
    pub fn field_at_visual_row(&self, row: usize) -> Option<usize> {
        let index = match self.ghost_gap() {
            Some(ghost) if row == ghost => return None,
            Some(ghost) if row > ghost => row - 1,
            _ => row,
        };
        (index < self.schema.len()).then_some(index)
    }

    /// First visual row shown in a canvas viewport of the given height,
    /// keeping the hover gap (or the selected field) in view.
    pub fn canvas_scroll(&self, viewport_rows: usize) -> usize {
        if viewport_rows == 0 {
            return 0;
        }
        let pinned = match self.ghost_gap() {
            Some(gap) => gap,
            None => self
                .builder
                .canvas_selected
                .min(self.schema.len().saturating_sub(1)),
        };
        pinned.saturating_sub(viewport_rows - 1)
    }

    /// Log the schema as JSON at the end of a session.
    pub fn log_schema(&self) {
        match serde_json::to_string(&self.schema) {
            Ok(json) => info!(fields = self.schema.len(), schema = %json, "final schema"),
            Err(err) => warn!(%err, "schema serialization failed"),
        }
    }
}

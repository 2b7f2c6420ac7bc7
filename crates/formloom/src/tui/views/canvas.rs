use super::*;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::info;

impl App {
    pub(super) fn handle_canvas_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.builder.canvas_selected = self.builder.canvas_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.schema.is_empty() {
                    self.builder.canvas_selected =
                        (self.builder.canvas_selected + 1).min(self.schema.len() - 1);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.begin_canvas_grab();
            }
            KeyCode::Char('e') => {
                self.open_selected_settings();
            }
            KeyCode::Char('d') => {
                self.duplicate_selected();
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                self.remove_selected();
            }
            KeyCode::Char('C') => {
                if !self.schema.is_empty() {
                    self.builder.confirm_clear = true;
                }
            }
            KeyCode::Left => {
                self.builder.focus = BuilderFocus::Palette;
            }
            _ => {}
        }
    }

    /// Grab the selected field. The hover starts on the field's own gap, so
    /// dropping without moving leaves the form unchanged.
    pub(super) fn begin_canvas_grab(&mut self) {
        if self.schema.is_empty() {
            return;
        }
        let index = self.builder.canvas_selected.min(self.schema.len() - 1);
        self.builder.canvas_selected = index;
        self.drag = self.drag.begin_field_drag(index).hover_gap(index);
    }

    pub(super) fn handle_confirm_clear_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let removed = self.schema.len();
                self.schema = self.schema.clear_fields();
                self.builder.canvas_selected = 0;
                self.builder.confirm_clear = false;
                if removed == 1 {
                    self.set_global_status("Removed 1 field", false);
                } else {
                    self.set_global_status(format!("Removed {} fields", removed), false);
                }
                info!(removed, "canvas cleared");
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.builder.confirm_clear = false;
            }
            _ => {}
        }
    }

    fn open_selected_settings(&mut self) {
        if let Some(field) = self.schema.fields.get(self.builder.canvas_selected) {
            self.settings = Some(SettingsPanel::open(field.clone()));
        }
    }

    fn duplicate_selected(&mut self) {
        let Some(field) = self.schema.fields.get(self.builder.canvas_selected) else {
            return;
        };
        let id = field.id.clone();
        let label = field.label.clone();

        self.schema = self.schema.duplicate_field(&id);
        if let Some(position) = self.schema.position(&id) {
            self.builder.canvas_selected = (position + 1).min(self.schema.len() - 1);
        }
        self.set_global_status(format!("Duplicated \"{}\"", label), false);
        info!(field = %id, "field duplicated");
    }

    fn remove_selected(&mut self) {
        let Some(field) = self.schema.fields.get(self.builder.canvas_selected) else {
            return;
        };
        let id = field.id.clone();
        let label = field.label.clone();

        self.schema = self.schema.remove_field(&id);
        self.builder.canvas_selected = self
            .builder
            .canvas_selected
            .min(self.schema.len().saturating_sub(1));
        self.set_global_status(format!("Removed \"{}\"", label), false);
        info!(field = %id, "field removed");
    }
}

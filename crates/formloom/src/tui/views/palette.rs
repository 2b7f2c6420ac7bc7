use super::*;
use crossterm::event::{KeyCode, KeyEvent};
use formloom_schema::model::FieldKind;

impl App {
    pub(super) fn handle_palette_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.builder.palette_selected = self.builder.palette_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.builder.palette_selected =
                    (self.builder.palette_selected + 1).min(FieldKind::ALL.len() - 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.begin_palette_grab();
            }
            KeyCode::Right => {
                self.builder.focus = BuilderFocus::Canvas;
            }
            _ => {}
        }
    }

    /// Grab the selected palette kind. The hover starts on the end gap so
    /// dropping without moving appends to the form.
    pub(super) fn begin_palette_grab(&mut self) {
        let kind = FieldKind::ALL[self.builder.palette_selected.min(FieldKind::ALL.len() - 1)];
        self.drag = self.drag.begin_palette_drag(kind).hover_gap(self.schema.len());
    }
}

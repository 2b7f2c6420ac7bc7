use super::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

impl App {
    pub(super) fn handle_settings_key(&mut self, key: KeyEvent) {
        let editing = self
            .settings
            .as_ref()
            .is_some_and(|panel| panel.editing.is_some());

        if editing {
            let Some(panel) = self.settings.as_mut() else {
                return;
            };
            match key.code {
                KeyCode::Esc => {
                    // Cancel edit, discard the buffer
                    panel.editing = None;
                }
                KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    let row = panel.focused_row();
                    if let Some(buffer) = panel.editing.take() {
                        panel.commit(row, buffer);
                    }
                }
                KeyCode::Enter if panel.focused_row() == SettingsRow::Options => {
                    // Options are one per line: Enter grows the list,
                    // Ctrl+S applies the buffer.
                    if let Some(buffer) = panel.editing.as_mut() {
                        buffer.push('\n');
                    }
                }
                KeyCode::Enter => {
                    let row = panel.focused_row();
                    if let Some(buffer) = panel.editing.take() {
                        panel.commit(row, buffer);
                    }
                }
                KeyCode::Backspace => {
                    if let Some(buffer) = panel.editing.as_mut() {
                        buffer.pop();
                    }
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if let Some(buffer) = panel.editing.as_mut() {
                        buffer.push(c);
                    }
                }
                _ => {}
            }
            return;
        }

        // Normal navigation mode
        match key.code {
            KeyCode::Esc => {
                // Close without saving
                self.settings = None;
            }
            KeyCode::Char('s') => {
                self.save_settings();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(panel) = self.settings.as_mut() {
                    panel.row = panel.row.saturating_sub(1);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(panel) = self.settings.as_mut() {
                    panel.row = (panel.row + 1).min(panel.rows().len() - 1);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle_or_edit_setting();
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(panel) = self.settings.as_mut() {
                    match panel.focused_row() {
                        SettingsRow::ColumnWidth => {
                            panel.field.column_width = panel.field.column_width.cycle();
                        }
                        SettingsRow::Required => {
                            panel.field.required = !panel.field.required;
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn toggle_or_edit_setting(&mut self) {
        let Some(panel) = self.settings.as_mut() else {
            return;
        };
        match panel.focused_row() {
            SettingsRow::Required => {
                panel.field.required = !panel.field.required;
            }
            SettingsRow::ColumnWidth => {
                panel.field.column_width = panel.field.column_width.cycle();
            }
            row => {
                panel.editing = Some(panel.value_of(row));
            }
        }
    }

    /// Push the working copy back into the schema and close the panel.
    ///
    /// A field removed while the panel was open cannot be saved; the
    /// replace falls through untouched and the failure is surfaced.
    fn save_settings(&mut self) {
        let Some(panel) = self.settings.take() else {
            return;
        };
        let id = panel.field.id.clone();
        let label = panel.field.label.clone();

        if self.schema.field(&id).is_none() {
            self.set_global_status("Field no longer exists", true);
            return;
        }

        self.schema = self.schema.replace_field(panel.field);
        self.set_global_status(format!("Saved \"{}\"", label), false);
        info!(field = %id, "field settings saved");
    }
}

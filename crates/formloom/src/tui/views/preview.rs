use super::*;
use crossterm::event::{KeyCode, KeyEvent};
use formloom_schema::model::{FieldDefinition, FieldKind};
use tracing::info;

impl App {
    pub(super) fn handle_preview_key(&mut self, key: KeyEvent) {
        if self.preview.submitted {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.preview.submitted = false;
            }
            return;
        }

        if self.preview.editing {
            match key.code {
                KeyCode::Esc => {
                    self.preview.editing = false;
                    self.preview.input.clear();
                }
                KeyCode::Enter => {
                    self.commit_value_edit();
                }
                KeyCode::Backspace => {
                    self.preview.input.pop();
                }
                KeyCode::Char(c) => {
                    self.preview.input.push(c);
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.mode = TuiMode::Build;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.preview.selected = self.preview.selected.saturating_sub(1);
                self.preview.option_cursor = 0;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.schema.is_empty() {
                    self.preview.selected =
                        (self.preview.selected + 1).min(self.schema.len() - 1);
                    self.preview.option_cursor = 0;
                }
            }
            KeyCode::Left => {
                self.adjust_selected_value(false);
            }
            KeyCode::Right => {
                self.adjust_selected_value(true);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.activate_selected_value();
            }
            KeyCode::Char('s') => {
                self.submit_preview();
            }
            KeyCode::Char('r') => {
                self.preview = PreviewState::default();
                self.set_global_status("Preview reset", false);
            }
            _ => {}
        }
    }

    /// Value shown for a field in the preview list, empty when unanswered.
    pub fn preview_display_value(&self, field: &FieldDefinition) -> String {
        self.preview
            .values
            .get(&field.id)
            .map(|value| value.display(field))
            .unwrap_or_default()
    }

    /// Enter/Space on the selected field: toggle, cycle or start typing,
    /// depending on its kind.
    fn activate_selected_value(&mut self) {
        let Some(field) = self.schema.fields.get(self.preview.selected).cloned() else {
            return;
        };
        match field.kind {
            FieldKind::Select | FieldKind::Radio => {
                self.cycle_choice(&field, true);
            }
            FieldKind::Checkbox => {
                self.toggle_check(&field);
            }
            FieldKind::Acceptance => {
                let accepted = matches!(
                    self.preview.values.get(&field.id),
                    Some(FillValue::Accepted(true))
                );
                self.preview
                    .values
                    .insert(field.id.clone(), FillValue::Accepted(!accepted));
            }
            _ => {
                // Text-like kinds open the inline editor seeded with the
                // current answer.
                self.preview.input = match self.preview.values.get(&field.id) {
                    Some(FillValue::Text(text)) => text.clone(),
                    _ => String::new(),
                };
                self.preview.editing = true;
            }
        }
    }

    /// Left/Right on the selected field: cycle a choice or move the
    /// checkbox option cursor.
    fn adjust_selected_value(&mut self, forward: bool) {
        let Some(field) = self.schema.fields.get(self.preview.selected).cloned() else {
            return;
        };
        match field.kind {
            FieldKind::Select | FieldKind::Radio => {
                self.cycle_choice(&field, forward);
            }
            FieldKind::Checkbox => {
                let max = field.option_pairs().len().saturating_sub(1);
                if forward {
                    self.preview.option_cursor = (self.preview.option_cursor + 1).min(max);
                } else {
                    self.preview.option_cursor = self.preview.option_cursor.saturating_sub(1);
                }
            }
            _ => {}
        }
    }

    fn cycle_choice(&mut self, field: &FieldDefinition, forward: bool) {
        let pairs = field.option_pairs();
        if pairs.is_empty() {
            return;
        }
        let current = match self.preview.values.get(&field.id) {
            Some(FillValue::Choice(value)) => pairs.iter().position(|pair| &pair.value == value),
            _ => None,
        };
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % pairs.len(),
            (Some(i), false) => (i + pairs.len() - 1) % pairs.len(),
            (None, true) => 0,
            (None, false) => pairs.len() - 1,
        };
        self.preview
            .values
            .insert(field.id.clone(), FillValue::Choice(pairs[next].value.clone()));
    }

    fn toggle_check(&mut self, field: &FieldDefinition) {
        let pairs = field.option_pairs();
        if pairs.is_empty() {
            return;
        }
        let cursor = self.preview.option_cursor.min(pairs.len() - 1);
        let value = pairs[cursor].value.clone();

        let mut checks = match self.preview.values.get(&field.id) {
            Some(FillValue::Checks(values)) => values.clone(),
            _ => Vec::new(),
        };
        match checks.iter().position(|v| v == &value) {
            Some(i) => {
                checks.remove(i);
            }
            None => checks.push(value),
        }
        self.preview
            .values
            .insert(field.id.clone(), FillValue::Checks(checks));
    }

    fn commit_value_edit(&mut self) {
        self.preview.editing = false;
        let input = std::mem::take(&mut self.preview.input);
        if let Some(field) = self.schema.fields.get(self.preview.selected) {
            self.preview
                .values
                .insert(field.id.clone(), FillValue::Text(input));
        }
    }

    fn submit_preview(&mut self) {
        let answered = self
            .schema
            .fields
            .iter()
            .filter(|field| !self.preview_display_value(field).is_empty())
            .count();
        info!(
            form = %self.schema.name,
            answered,
            total = self.schema.len(),
            "preview submitted"
        );
        self.preview.submitted = true;
    }
}

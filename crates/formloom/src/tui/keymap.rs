use super::app::{App, BuilderFocus, SettingsRow, TuiMode};
use super::components::action_bar::ActionHint;

fn ordered_hints(items: &[(&'static str, &'static str)]) -> Vec<ActionHint> {
    let mut hints = Vec::with_capacity(items.len());
    let mut priority: i16 = 100;
    for (key, label) in items {
        let prio = priority.max(1) as u8;
        hints.push(ActionHint::new(*key, *label, prio));
        priority -= 5;
    }
    hints
}

fn palette_actions() -> Vec<ActionHint> {
    ordered_hints(&[
        ("Up/Down", "Kind"),
        ("Enter", "Grab"),
        ("Tab", "Canvas"),
        ("p", "Preview"),
        ("?", "Help"),
    ])
}

fn canvas_actions(app: &App) -> Vec<ActionHint> {
    if app.schema.is_empty() {
        // Field actions stay visible but dimmed until a field exists.
        let mut hints = vec![ActionHint::new("Tab", "Palette", 100)];
        hints.push(ActionHint::disabled("Enter", "Grab", 95));
        hints.push(ActionHint::disabled("e", "Edit", 90));
        hints.push(ActionHint::new("?", "Help", 85));
        return hints;
    }

    ordered_hints(&[
        ("Up/Down", "Select"),
        ("Enter", "Grab"),
        ("e", "Edit"),
        ("d", "Duplicate"),
        ("x", "Remove"),
        ("C", "Clear all"),
        ("Tab", "Palette"),
        ("?", "Help"),
    ])
}

fn drag_actions() -> Vec<ActionHint> {
    ordered_hints(&[
        ("Up/Down", "Move gap"),
        ("Enter", "Drop"),
        ("Esc", "Cancel"),
    ])
}

fn confirm_clear_actions() -> Vec<ActionHint> {
    ordered_hints(&[("y", "Remove all"), ("n", "Keep")])
}

fn settings_actions(app: &App) -> Vec<ActionHint> {
    let Some(panel) = app.settings.as_ref() else {
        return Vec::new();
    };

    if panel.editing.is_some() {
        if panel.focused_row() == SettingsRow::Options {
            return ordered_hints(&[
                ("Enter", "New line"),
                ("Ctrl+S", "Apply"),
                ("Esc", "Cancel"),
            ]);
        }
        return ordered_hints(&[("Enter", "Apply"), ("Esc", "Cancel")]);
    }

    ordered_hints(&[
        ("Up/Down", "Row"),
        ("Enter", "Edit/Toggle"),
        ("s", "Save"),
        ("Esc", "Discard"),
    ])
}

fn preview_actions(app: &App) -> Vec<ActionHint> {
    if app.preview.submitted {
        return ordered_hints(&[("Enter", "Close")]);
    }
    if app.preview.editing {
        return ordered_hints(&[("Enter", "Apply"), ("Esc", "Cancel")]);
    }

    ordered_hints(&[
        ("Up/Down", "Field"),
        ("Left/Right", "Adjust"),
        ("Enter", "Answer"),
        ("s", "Submit"),
        ("r", "Reset"),
        ("b", "Build"),
        ("?", "Help"),
    ])
}

impl App {
    pub fn effective_actions(&self) -> Vec<ActionHint> {
        if self.settings.is_some() {
            return settings_actions(self);
        }
        if self.builder.confirm_clear {
            return confirm_clear_actions();
        }

        match self.mode {
            TuiMode::Build => {
                if self.drag.is_dragging() {
                    drag_actions()
                } else {
                    match self.builder.focus {
                        BuilderFocus::Palette => palette_actions(),
                        BuilderFocus::Canvas => canvas_actions(self),
                    }
                }
            }
            TuiMode::Preview => preview_actions(self),
        }
    }

    pub fn global_actions(&self) -> Vec<ActionHint> {
        let mut actions = ordered_hints(&[
            ("?", "Help"),
            ("q", "Quit"),
            ("p", "Preview"),
            ("Tab", "Focus"),
            ("Ctrl+C", "Quit"),
        ]);

        if self.in_text_input_mode() {
            actions.insert(0, ActionHint::new("Esc", "Exit input", 110));
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::TuiArgs;
    use formloom_schema::model::FieldKind;

    fn app() -> App {
        App::new(TuiArgs { form_name: None })
    }

    #[test]
    fn test_priorities_descend_in_listed_order() {
        let hints = palette_actions();
        for pair in hints.windows(2) {
            assert!(pair[0].priority > pair[1].priority);
        }
    }

    #[test]
    fn test_drag_actions_replace_focus_actions() {
        let mut app = app();
        app.schema = app.schema.insert_field(0, FieldKind::Text);
        app.drag = app.drag.begin_field_drag(0).hover_gap(0);

        let hints = app.effective_actions();
        assert!(hints.iter().any(|h| h.label == "Drop"));
        assert!(hints.iter().all(|h| h.label != "Duplicate"));
    }

    #[test]
    fn test_empty_canvas_disables_field_actions() {
        let mut app = app();
        app.builder.focus = BuilderFocus::Canvas;

        let hints = app.effective_actions();
        let edit = hints.iter().find(|h| h.key == "e").unwrap();
        assert!(!edit.enabled);
    }

    #[test]
    fn test_options_editor_hints_offer_new_line() {
        let mut app = app();
        app.schema = app.schema.insert_field(0, FieldKind::Select);
        let mut panel = crate::tui::app::SettingsPanel::open(app.schema.fields[0].clone());
        panel.row = panel.rows().len() - 1; // Options is the last select row
        panel.editing = Some(panel.value_of(SettingsRow::Options));
        app.settings = Some(panel);

        let hints = app.effective_actions();
        assert!(hints.iter().any(|h| h.label == "New line"));
        assert!(hints.iter().any(|h| h.key == "Ctrl+S" && h.label == "Apply"));
    }

    #[test]
    fn test_text_input_mode_prepends_exit_hint() {
        let mut app = app();
        app.schema = app.schema.insert_field(0, FieldKind::Text);
        app.toggle_preview();
        app.preview.editing = true;

        let actions = app.global_actions();
        assert_eq!(actions[0].key, "Esc");
        assert_eq!(actions[0].label, "Exit input");
    }
}

//! Interaction tests for preview mode, driven end to end through the
//! public key handler: answering each field kind, submission and reset.

use crossterm::event::KeyCode;
use formloom_schema::model::FieldKind;

use super::app::{FillValue, TuiMode};
use super::test_harness::TuiTestHarness;

fn preview_of(kinds: &[FieldKind]) -> TuiTestHarness {
    let mut harness = TuiTestHarness::new();
    for (i, kind) in kinds.iter().enumerate() {
        harness.app.schema = harness.app.schema.insert_field(i, *kind);
    }
    harness.press(KeyCode::Char('p'));
    assert_eq!(harness.app.mode, TuiMode::Preview);
    harness
}

fn answer_of(harness: &TuiTestHarness, index: usize) -> Option<FillValue> {
    let id = &harness.app.schema.fields[index].id;
    harness.app.preview.values.get(id).cloned()
}

#[test]
fn test_text_answer_via_inline_editor() {
    let mut harness = preview_of(&[FieldKind::Text]);

    harness.press(KeyCode::Enter);
    assert!(harness.app.preview.editing);
    harness.type_text("Ada Lovelace");
    harness.press(KeyCode::Enter);

    assert!(!harness.app.preview.editing);
    assert_eq!(
        answer_of(&harness, 0),
        Some(FillValue::Text("Ada Lovelace".into()))
    );
    harness.render().assert_contains("[ Ada Lovelace ]");
}

#[test]
fn test_editor_escape_discards_input() {
    let mut harness = preview_of(&[FieldKind::Text]);

    harness.press(KeyCode::Enter);
    harness.type_text("typo");
    harness.press(KeyCode::Esc);

    assert!(!harness.app.preview.editing);
    assert_eq!(answer_of(&harness, 0), None);
    // Esc left the editor, not preview mode.
    assert_eq!(harness.app.mode, TuiMode::Preview);
}

#[test]
fn test_reediting_seeds_previous_answer() {
    let mut harness = preview_of(&[FieldKind::Email]);

    harness.press(KeyCode::Enter);
    harness.type_text("a@b.c");
    harness.press(KeyCode::Enter);

    harness.press(KeyCode::Enter);
    assert_eq!(harness.app.preview.input, "a@b.c");
    harness.press(KeyCode::Esc);
}

#[test]
fn test_select_cycles_through_options() {
    let mut harness = preview_of(&[FieldKind::Select]);

    harness.press(KeyCode::Right);
    assert_eq!(answer_of(&harness, 0), Some(FillValue::Choice("option1".into())));
    harness.render().assert_contains("< Option 1 >");

    harness.press(KeyCode::Right);
    assert_eq!(answer_of(&harness, 0), Some(FillValue::Choice("option2".into())));

    // The cycle wraps.
    harness.press(KeyCode::Right);
    assert_eq!(answer_of(&harness, 0), Some(FillValue::Choice("option1".into())));

    harness.press(KeyCode::Left);
    assert_eq!(answer_of(&harness, 0), Some(FillValue::Choice("option2".into())));
}

#[test]
fn test_checkbox_toggles_under_option_cursor() {
    let mut harness = preview_of(&[FieldKind::Checkbox]);

    harness.press(KeyCode::Enter);
    assert_eq!(
        answer_of(&harness, 0),
        Some(FillValue::Checks(vec!["option1".into()]))
    );

    harness.press(KeyCode::Right);
    harness.press(KeyCode::Enter);
    assert_eq!(
        answer_of(&harness, 0),
        Some(FillValue::Checks(vec!["option1".into(), "option2".into()]))
    );

    // Toggling again unchecks.
    harness.press(KeyCode::Enter);
    assert_eq!(
        answer_of(&harness, 0),
        Some(FillValue::Checks(vec!["option1".into()]))
    );
    harness.render().assert_contains("[x] Option 1");
}

#[test]
fn test_acceptance_toggles_on_enter() {
    let mut harness = preview_of(&[FieldKind::Acceptance]);

    harness.press(KeyCode::Enter);
    assert_eq!(answer_of(&harness, 0), Some(FillValue::Accepted(true)));
    harness.render().assert_contains("[x] I agree to the terms");

    harness.press(KeyCode::Enter);
    assert_eq!(answer_of(&harness, 0), Some(FillValue::Accepted(false)));
}

#[test]
fn test_submit_summarizes_answers() {
    let mut harness = preview_of(&[FieldKind::Text, FieldKind::Email]);

    harness.press(KeyCode::Enter);
    harness.type_text("Ada");
    harness.press(KeyCode::Enter);

    harness.press(KeyCode::Char('s'));
    assert!(harness.app.preview.submitted);

    let snapshot = harness.render();
    snapshot.assert_contains("Form Submitted Successfully!");
    snapshot.assert_contains("Ada");
    snapshot.assert_contains("—"); // the unanswered email field

    harness.press(KeyCode::Enter);
    assert!(!harness.app.preview.submitted);
    assert_eq!(harness.app.mode, TuiMode::Preview);
}

#[test]
fn test_reset_clears_every_answer() {
    let mut harness = preview_of(&[FieldKind::Text, FieldKind::Select]);

    harness.press(KeyCode::Enter);
    harness.type_text("value");
    harness.press(KeyCode::Enter);
    harness.press(KeyCode::Down);
    harness.press(KeyCode::Right);
    assert_eq!(harness.app.preview.values.len(), 2);

    harness.press(KeyCode::Char('r'));
    assert!(harness.app.preview.values.is_empty());
    assert!(!harness.app.preview.submitted);
}

#[test]
fn test_answers_follow_fields_across_reorder() {
    let mut harness = preview_of(&[FieldKind::Text, FieldKind::Email]);
    let text_id = harness.app.schema.fields[0].id.clone();

    harness.press(KeyCode::Enter);
    harness.type_text("kept");
    harness.press(KeyCode::Enter);

    // Back to build, move the text field to the end, preview again.
    harness.press(KeyCode::Char('b'));
    harness.app.schema = harness.app.schema.move_field(0, 2);
    harness.press(KeyCode::Char('p'));

    assert_eq!(harness.app.schema.position(&text_id), Some(1));
    assert_eq!(
        harness.app.preview.values.get(&text_id),
        Some(&FillValue::Text("kept".into()))
    );
}

#[test]
fn test_escape_returns_to_build() {
    let mut harness = preview_of(&[FieldKind::Date]);
    harness.press(KeyCode::Esc);
    assert_eq!(harness.app.mode, TuiMode::Build);
}

#[test]
fn test_typed_answer_may_contain_mode_keys() {
    let mut harness = preview_of(&[FieldKind::Text]);

    harness.press(KeyCode::Enter);
    harness.type_text("pqrs bpqrs");
    harness.press(KeyCode::Enter);

    // 'p', 'b' and 'q' went into the answer, not into mode switches.
    assert_eq!(harness.app.mode, TuiMode::Preview);
    assert!(harness.app.running);
    assert_eq!(
        answer_of(&harness, 0),
        Some(FillValue::Text("pqrs bpqrs".into()))
    );
}

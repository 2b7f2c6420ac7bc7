//! Drag-and-drop interaction state machine.
//!
//! Canonical definitions for [`DragState`], [`DragSession`] and the
//! [`DropAction`] effect a completed drop emits.
//!
//! The session is a plain value with no connection to any UI framework.
//! Every transition consumes the session and returns the next one; the
//! caller owns the current session and swaps it on each event. A drop is the
//! only transition with an effect, and even that is just a returned value
//! the caller applies to its schema.
//!
//! Transitions are total. A hover while idle, a drop with nothing in
//! flight, or a drop back onto the dragged field's own gap all resolve to
//! "nothing happens", never to an error.

use formloom_schema::{is_noop_move, FieldKind};
use serde::{Deserialize, Serialize};

// ============================================================================
// Drag State - What is currently in flight
// ============================================================================

/// What the drag currently carries.
///
/// Carrying a palette kind and carrying a canvas index are distinct states,
/// so the two payloads can never be set at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    /// Nothing in flight
    #[default]
    Idle,

    /// A new field of this kind, picked up from the palette
    DraggingNew(FieldKind),

    /// The existing field at this canvas index, being reordered
    DraggingExisting(usize),
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    /// Canonical name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DragState::Idle => "idle",
            DragState::DraggingNew(_) => "dragging_new",
            DragState::DraggingExisting(_) => "dragging_existing",
        }
    }
}

// ============================================================================
// Drop Action - The effect a completed drop asks the caller to apply
// ============================================================================

/// Schema operation a drop resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropAction {
    /// Insert a factory-default field of `kind` at `index`
    InsertNew { index: usize, kind: FieldKind },

    /// Move the field at `from` to gap `to`
    MoveExisting { from: usize, to: usize },
}

// ============================================================================
// Drag Session - State plus the hovered gap
// ============================================================================

/// A drag in progress (or not): the carried payload plus the hovered gap.
///
/// Gap `g` names the slot before field `g`; gap `len` is the slot after the
/// last field. The hover only exists while something is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DragSession {
    state: DragState,
    hover: Option<usize>,
}

impl DragSession {
    /// An idle session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// The hovered insertion gap, while dragging.
    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    pub fn is_dragging(&self) -> bool {
        !self.state.is_idle()
    }

    /// The palette kind in flight, if this is a palette drag.
    pub fn dragged_kind(&self) -> Option<FieldKind> {
        match self.state {
            DragState::DraggingNew(kind) => Some(kind),
            _ => None,
        }
    }

    /// The canvas index in flight, if this is a reorder drag.
    pub fn dragged_index(&self) -> Option<usize> {
        match self.state {
            DragState::DraggingExisting(index) => Some(index),
            _ => None,
        }
    }

    /// Pick up a new field from the palette. Replaces any drag in flight.
    #[must_use]
    pub fn begin_palette_drag(self, kind: FieldKind) -> Self {
        Self {
            state: DragState::DraggingNew(kind),
            hover: None,
        }
    }

    /// Pick up the existing field at `index`. Replaces any drag in flight.
    #[must_use]
    pub fn begin_field_drag(self, index: usize) -> Self {
        Self {
            state: DragState::DraggingExisting(index),
            hover: None,
        }
    }

    /// Hover the insertion gap `gap`. Ignored while idle.
    #[must_use]
    pub fn hover_gap(self, gap: usize) -> Self {
        if self.state.is_idle() {
            self
        } else {
            Self {
                hover: Some(gap),
                ..self
            }
        }
    }

    /// Leave the hovered gap without dropping.
    #[must_use]
    pub fn clear_hover(self) -> Self {
        Self {
            hover: None,
            ..self
        }
    }

    /// Abandon the drag. The schema is untouched.
    #[must_use]
    pub fn cancel(self) -> Self {
        Self::new()
    }

    /// Complete the drag on gap `gap`.
    ///
    /// Always returns an idle session. The action is `None` when nothing was
    /// in flight, and for a reorder dropped onto its own gap or the gap just
    /// after it ([`is_noop_move`]).
    #[must_use]
    pub fn drop_on_gap(self, gap: usize) -> (Self, Option<DropAction>) {
        let action = match self.state {
            DragState::Idle => None,
            DragState::DraggingNew(kind) => Some(DropAction::InsertNew { index: gap, kind }),
            DragState::DraggingExisting(from) => {
                if is_noop_move(from, gap) {
                    None
                } else {
                    Some(DropAction::MoveExisting { from, to: gap })
                }
            }
        };
        (Self::new(), action)
    }

    /// Complete the drag on the hovered gap. With no gap hovered this is a
    /// cancel.
    #[must_use]
    pub fn drop_on_hover(self) -> (Self, Option<DropAction>) {
        match self.hover {
            Some(gap) => self.drop_on_gap(gap),
            None => (Self::new(), None),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_idle() {
        let session = DragSession::new();
        assert_eq!(session.state(), DragState::Idle);
        assert!(!session.is_dragging());
        assert_eq!(session.hover(), None);
    }

    #[test]
    fn test_palette_pickup_carries_kind() {
        let session = DragSession::new().begin_palette_drag(FieldKind::Select);
        assert!(session.is_dragging());
        assert_eq!(session.dragged_kind(), Some(FieldKind::Select));
        assert_eq!(session.dragged_index(), None);
        assert_eq!(session.hover(), None);
    }

    #[test]
    fn test_field_pickup_carries_index() {
        let session = DragSession::new().begin_field_drag(2);
        assert!(session.is_dragging());
        assert_eq!(session.dragged_index(), Some(2));
        assert_eq!(session.dragged_kind(), None);
    }

    #[test]
    fn test_pickup_replaces_drag_in_flight() {
        let session = DragSession::new()
            .begin_palette_drag(FieldKind::Text)
            .hover_gap(1)
            .begin_field_drag(0);
        assert_eq!(session.dragged_index(), Some(0));
        assert_eq!(session.dragged_kind(), None);
        assert_eq!(session.hover(), None, "pickup resets any stale hover");
    }

    #[test]
    fn test_hover_requires_drag_in_flight() {
        let session = DragSession::new().hover_gap(3);
        assert_eq!(session.hover(), None);
    }

    #[test]
    fn test_hover_tracks_gap_while_dragging() {
        let session = DragSession::new().begin_palette_drag(FieldKind::Date);
        let session = session.hover_gap(0);
        assert_eq!(session.hover(), Some(0));
        let session = session.hover_gap(4);
        assert_eq!(session.hover(), Some(4));
        let session = session.clear_hover();
        assert_eq!(session.hover(), None);
        assert!(session.is_dragging(), "leaving a gap keeps the drag alive");
    }

    #[test]
    fn test_drop_while_idle_emits_nothing() {
        let (session, action) = DragSession::new().drop_on_gap(0);
        assert_eq!(action, None);
        assert_eq!(session, DragSession::new());
    }

    #[test]
    fn test_palette_drop_emits_insert() {
        let (session, action) = DragSession::new()
            .begin_palette_drag(FieldKind::Radio)
            .hover_gap(3)
            .drop_on_gap(3);
        assert_eq!(
            action,
            Some(DropAction::InsertNew {
                index: 3,
                kind: FieldKind::Radio
            })
        );
        assert_eq!(session, DragSession::new());
    }

    #[test]
    fn test_field_drop_emits_move() {
        let (session, action) = DragSession::new().begin_field_drag(0).drop_on_gap(2);
        assert_eq!(action, Some(DropAction::MoveExisting { from: 0, to: 2 }));
        assert_eq!(session, DragSession::new());
    }

    #[test]
    fn test_drop_on_own_gap_emits_nothing() {
        let (session, action) = DragSession::new().begin_field_drag(2).drop_on_gap(2);
        assert_eq!(action, None);
        assert_eq!(session, DragSession::new(), "session still resets");
    }

    #[test]
    fn test_drop_on_gap_after_self_emits_nothing() {
        let (_, action) = DragSession::new().begin_field_drag(2).drop_on_gap(3);
        assert_eq!(action, None);
    }

    #[test]
    fn test_drop_on_farther_gaps_still_moves() {
        let (_, action) = DragSession::new().begin_field_drag(2).drop_on_gap(0);
        assert_eq!(action, Some(DropAction::MoveExisting { from: 2, to: 0 }));

        let (_, action) = DragSession::new().begin_field_drag(2).drop_on_gap(4);
        assert_eq!(action, Some(DropAction::MoveExisting { from: 2, to: 4 }));
    }

    #[test]
    fn test_cancel_resets_everything() {
        let session = DragSession::new()
            .begin_palette_drag(FieldKind::Acceptance)
            .hover_gap(1)
            .cancel();
        assert_eq!(session, DragSession::new());
    }

    #[test]
    fn test_drop_on_hover_uses_hovered_gap() {
        let (_, action) = DragSession::new()
            .begin_palette_drag(FieldKind::Email)
            .hover_gap(2)
            .drop_on_hover();
        assert_eq!(
            action,
            Some(DropAction::InsertNew {
                index: 2,
                kind: FieldKind::Email
            })
        );
    }

    #[test]
    fn test_drop_without_hover_is_a_cancel() {
        let (session, action) = DragSession::new()
            .begin_field_drag(1)
            .drop_on_hover();
        assert_eq!(action, None);
        assert_eq!(session, DragSession::new());
    }

    #[test]
    fn test_session_serde_roundtrip() {
        let session = DragSession::new()
            .begin_palette_drag(FieldKind::Checkbox)
            .hover_gap(5);
        let encoded = serde_json::to_string(&session).unwrap();
        let decoded: DragSession = serde_json::from_str(&encoded).unwrap();
        assert_eq!(session, decoded);
    }
}

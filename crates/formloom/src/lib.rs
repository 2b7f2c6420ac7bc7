//! Formloom - Terminal Form Designer
//!
//! Application shell: rendering, input handling and the per-session state.
//! Schema semantics live in `formloom_schema`, the drag state machine in
//! `formloom_drag`.

pub mod tui;

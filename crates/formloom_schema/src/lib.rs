//! Form Schema System
//!
//! # Philosophy: The schema is a value
//!
//! A form under construction is one immutable value ([`FormSchema`]): its
//! presentation metadata plus an ordered sequence of fields. Editing never
//! mutates in place. Every operation in [`store`] takes the current schema
//! by reference and returns the next schema; callers swap the whole value.
//!
//! Operations are total and fail safe:
//! - Out-of-range indices clamp to the valid range
//! - Ids that resolve to nothing leave the schema unchanged
//! - Malformed option encodings degrade gracefully, never error
//!
//! This keeps the interaction layer honest: a drop, a save or a delete can
//! race a stale index or a deleted field and the worst outcome is a no-op.
//!
//! # Modules
//!
//! - [`model`]: Core types (FieldKind, ColumnWidth, FieldDefinition, FormSchema)
//! - [`store`]: Editing operations (insert, remove, duplicate, replace, move, clear)

pub mod model;
pub mod store;

pub use model::*;
pub use store::is_noop_move;

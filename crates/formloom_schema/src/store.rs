//! Editing operations over [`FormSchema`].
//!
//! Every operation takes the current schema by reference and returns the
//! next schema. The input is never mutated. All operations are total:
//! indices clamp to the valid range, unknown ids leave the schema unchanged.

use crate::model::{FieldDefinition, FieldKind, FormSchema};
use formloom_ids::FieldId;

/// True when moving a field to gap `to` would put it back where it already
/// is. Gap `from` is the slot just before the field, gap `from + 1` the slot
/// just after it. Indices are pre-removal.
pub fn is_noop_move(from: usize, to: usize) -> bool {
    to == from || to == from + 1
}

impl FormSchema {
    fn with_fields(&self, fields: Vec<FieldDefinition>) -> FormSchema {
        FormSchema {
            name: self.name.clone(),
            success_message: self.success_message.clone(),
            fields,
        }
    }

    /// Insert a factory-default field of `kind` at `index`.
    ///
    /// The index clamps to the end of the sequence, so any gap a drop could
    /// name is a valid target.
    pub fn insert_field(&self, index: usize, kind: FieldKind) -> FormSchema {
        let index = index.min(self.fields.len());
        let mut fields = self.fields.clone();
        fields.insert(index, FieldDefinition::default_for(kind));
        self.with_fields(fields)
    }

    /// Remove the field with `id`. Unknown ids leave the schema unchanged.
    pub fn remove_field(&self, id: &FieldId) -> FormSchema {
        let fields = self
            .fields
            .iter()
            .filter(|f| &f.id != id)
            .cloned()
            .collect();
        self.with_fields(fields)
    }

    /// Insert a copy of the field with `id` immediately after it, carrying a
    /// fresh id and a `_copy` suffixed name. Unknown ids leave the schema
    /// unchanged.
    pub fn duplicate_field(&self, id: &FieldId) -> FormSchema {
        match self.position(id) {
            Some(index) => {
                let mut fields = self.fields.clone();
                let copy = fields[index].duplicated();
                fields.insert(index + 1, copy);
                self.with_fields(fields)
            }
            None => self.clone(),
        }
    }

    /// Swap in `updated` over the field with the same id, keeping its
    /// position. When no field carries that id the schema is unchanged,
    /// which covers saving an edit against a field deleted meanwhile.
    pub fn replace_field(&self, updated: FieldDefinition) -> FormSchema {
        let fields = self
            .fields
            .iter()
            .map(|f| {
                if f.id == updated.id {
                    updated.clone()
                } else {
                    f.clone()
                }
            })
            .collect();
        self.with_fields(fields)
    }

    /// Move the field at `from` to gap `to`.
    ///
    /// `from` clamps to the last field, `to` to the gap after it. Dropping a
    /// field into the gap before or after itself ([`is_noop_move`]) leaves
    /// the schema unchanged. Otherwise the field is spliced out and `to` is
    /// applied against the shortened sequence: in `[A, B, C]`, moving index 0
    /// to gap 2 yields `[B, C, A]`.
    pub fn move_field(&self, from: usize, to: usize) -> FormSchema {
        if self.fields.is_empty() {
            return self.clone();
        }
        let from = from.min(self.fields.len() - 1);
        let to = to.min(self.fields.len());
        if is_noop_move(from, to) {
            return self.clone();
        }

        let mut fields = self.fields.clone();
        let field = fields.remove(from);
        let insert_at = to.min(fields.len());
        fields.insert(insert_at, field);
        self.with_fields(fields)
    }

    /// Drop every field, keeping the form metadata.
    pub fn clear_fields(&self) -> FormSchema {
        self.with_fields(Vec::new())
    }
}

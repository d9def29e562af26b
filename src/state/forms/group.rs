//! Repeatable group editing
//!
//! A `RowGroup` manages the ordered row sequence stored under one parent
//! field name. It never touches the values map directly: every operation
//! reads the current sequence through the controller, rebuilds it, and
//! writes the whole sequence back with `set_field_value`.

use super::{FieldValue, FormController, RowDraft};

/// One column of a repeatable group, as shown to the render callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupField {
    pub name: String,
    pub label: String,
}

impl GroupField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// Editor for an ordered sequence of `RowDraft`s under one parent field
#[derive(Debug, Clone)]
pub struct RowGroup {
    /// Parent field name in the form values
    pub name: String,
    /// Section heading
    pub title: String,
    /// Sub-entity fields in render order
    pub fields: Vec<GroupField>,
    /// Immutable default-row template, deep-copied on every append
    template: RowDraft,
}

impl RowGroup {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        fields: Vec<GroupField>,
        template: RowDraft,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            fields,
            template,
        }
    }

    pub fn row_count(&self, controller: &FormController) -> usize {
        controller.values().rows(&self.name).len()
    }

    /// Append a fresh copy of the default row at the end of the sequence.
    /// The append itself is never gated on validity.
    pub fn append(&self, controller: &mut FormController) {
        let mut rows = controller.values().rows(&self.name).to_vec();
        rows.push(self.template.fresh_copy());
        controller.set_field_value(&self.name, FieldValue::Rows(rows));
    }

    /// Remove the row at `index`; rows above it shift down by one. Out of
    /// range indices are ignored.
    pub fn remove(&self, controller: &mut FormController, index: usize) {
        let mut rows = controller.values().rows(&self.name).to_vec();
        if index >= rows.len() {
            return;
        }
        rows.remove(index);
        controller.set_field_value(&self.name, FieldValue::Rows(rows));
    }

    /// Replace a single field of a single row, leaving every other row and
    /// field untouched.
    pub fn update_field(
        &self,
        controller: &mut FormController,
        index: usize,
        field: &str,
        value: FieldValue,
    ) {
        update_row_field(controller, &self.name, index, field, value);
    }
}

/// Shared row-field write path, also used by the relation picker when its
/// binding points into a group row.
pub fn update_row_field(
    controller: &mut FormController,
    group: &str,
    index: usize,
    field: &str,
    value: FieldValue,
) {
    let mut rows = controller.values().rows(group).to_vec();
    let Some(row) = rows.get_mut(index) else {
        return;
    };
    row.set(field, value);
    controller.set_field_value(group, FieldValue::Rows(rows));
}

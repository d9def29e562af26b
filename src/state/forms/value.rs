//! Form value objects

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Transient identity for one row of a repeatable group.
///
/// Used only for rendering and removal bookkeeping while the form is open;
/// it is regenerated whenever a record is hydrated into a form and is never
/// written back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId(Uuid);

impl RowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    /// Foreign-key identifier chosen through a relation picker
    Relation(Option<String>),
    /// Ordered sub-records of a repeatable group
    Rows(Vec<RowDraft>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Get the text value (returns empty string for non-text fields)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Get the numeric value (returns 0.0 for non-number fields)
    pub fn as_number(&self) -> f64 {
        match self {
            FieldValue::Number(n) => *n,
            _ => 0.0,
        }
    }

    /// Get the date value
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the selected relation identifier
    pub fn as_relation(&self) -> Option<&str> {
        match self {
            FieldValue::Relation(id) => id.as_deref(),
            _ => None,
        }
    }

    /// Get the row sequence (returns an empty slice for non-group fields)
    pub fn as_rows(&self) -> &[RowDraft] {
        match self {
            FieldValue::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// Push a character into a text value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = self {
            s.push(c);
        }
    }

    /// Remove the last character from a text value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = self {
            s.pop();
        }
    }

    /// Reset the value to its kind's empty state
    pub fn clear(&mut self) {
        match self {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Number(n) => *n = 0.0,
            FieldValue::Date(_) => {}
            FieldValue::Relation(id) => *id = None,
            FieldValue::Rows(rows) => rows.clear(),
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            FieldValue::Date(d) => d.format("%d/%m/%Y").to_string(),
            FieldValue::Relation(Some(id)) => id.clone(),
            FieldValue::Relation(None) => String::new(),
            FieldValue::Rows(rows) => format!("{} rows", rows.len()),
        }
    }
}

/// The full set of field values for one entity instance being edited
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Text value at `name`, empty if absent or a different kind
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    /// Numeric value at `name`, 0.0 if absent or a different kind
    pub fn number(&self, name: &str) -> f64 {
        self.get(name).map(FieldValue::as_number).unwrap_or(0.0)
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.get(name).and_then(FieldValue::as_date)
    }

    pub fn relation(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_relation)
    }

    /// Row sequence at `name`, empty if absent or a different kind
    pub fn rows(&self, name: &str) -> &[RowDraft] {
        self.get(name).map(FieldValue::as_rows).unwrap_or(&[])
    }

    pub fn field_count(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, FieldValue)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One in-progress sub-record inside a repeatable group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDraft {
    pub row_id: RowId,
    pub fields: FormValues,
}

impl RowDraft {
    pub fn new(fields: FormValues) -> Self {
        Self {
            row_id: RowId::new(),
            fields,
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Replace one field's value. Names outside the row's declared field set
    /// are ignored so the editor can never introduce unknown fields.
    pub fn set(&mut self, name: &str, value: FieldValue) {
        if self.fields.contains(name) {
            self.fields.insert(name, value);
        }
    }

    /// Deep copy with a fresh transient identity
    pub fn fresh_copy(&self) -> Self {
        Self {
            row_id: RowId::new(),
            fields: self.fields.clone(),
        }
    }
}

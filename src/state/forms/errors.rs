//! Per-field error display state
//!
//! Messages live here only for display: the validation pass produces them,
//! the field renderers consume them, and nothing else reads them back.

use std::collections::HashMap;

/// Field-name (or group/row-index/field-name) keyed messages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    scalar: HashMap<String, String>,
    rows: HashMap<String, HashMap<usize, HashMap<String, String>>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_scalar(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.scalar.insert(field.into(), message.into());
    }

    pub fn insert_row(
        &mut self,
        group: impl Into<String>,
        index: usize,
        field: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.rows
            .entry(group.into())
            .or_default()
            .entry(index)
            .or_default()
            .insert(field.into(), message.into());
    }

    pub fn scalar(&self, field: &str) -> Option<&str> {
        self.scalar.get(field).map(String::as_str)
    }

    pub fn row(&self, group: &str, index: usize, field: &str) -> Option<&str> {
        self.rows
            .get(group)
            .and_then(|rows| rows.get(&index))
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.scalar.is_empty() && self.rows.values().all(|rows| rows.is_empty())
    }

    /// Total number of messages across scalar and row entries
    pub fn len(&self) -> usize {
        let row_len: usize = self
            .rows
            .values()
            .flat_map(|rows| rows.values())
            .map(|fields| fields.len())
            .sum();
        self.scalar.len() + row_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        let errors = FieldErrors::new();
        assert!(errors.is_empty());
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_scalar_roundtrip() {
        let mut errors = FieldErrors::new();
        errors.insert_scalar("name", "name is a required field");
        assert_eq!(errors.scalar("name"), Some("name is a required field"));
        assert!(errors.scalar("other").is_none());
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_row_roundtrip() {
        let mut errors = FieldErrors::new();
        errors.insert_row("inventory", 1, "quantity", "quantity must be an integer");
        assert_eq!(
            errors.row("inventory", 1, "quantity"),
            Some("quantity must be an integer")
        );
        assert!(errors.row("inventory", 0, "quantity").is_none());
        assert!(errors.row("employee", 1, "quantity").is_none());
    }

    #[test]
    fn test_len_counts_all_messages() {
        let mut errors = FieldErrors::new();
        errors.insert_scalar("name", "a");
        errors.insert_row("inventory", 0, "unit", "b");
        errors.insert_row("inventory", 2, "quantity", "c");
        errors.insert_row("employee", 0, "role", "d");
        assert_eq!(errors.len(), 4);
    }
}

//! Page-level form controller
//!
//! Owns the values, errors, and submission state for one open form. Every
//! mutation from child components goes through `set_field_value`; the
//! declarative schema is re-run on each change so the error map always
//! matches the current values.

use super::{FieldErrors, FieldValue, FormValues};
use crate::validation::Schema;

#[derive(Debug, Clone)]
pub struct FormController {
    values: FormValues,
    errors: FieldErrors,
    schema: Schema,
    submitting: bool,
    dirty: bool,
}

impl FormController {
    pub fn new(initial: FormValues, schema: Schema) -> Self {
        let errors = schema.validate(&initial);
        Self {
            values: initial,
            errors,
            schema,
            submitting: false,
            dirty: false,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// The single mutation entry point. Replaces one field's value and
    /// re-runs validation against the new values.
    pub fn set_field_value(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name, value);
        self.dirty = true;
        self.errors = self.schema.validate(&self.values);
    }

    /// Re-run validation without mutating values; returns validity
    pub fn validate(&mut self) -> bool {
        self.errors = self.schema.validate(&self.values);
        self.errors.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Enter the submitting state. Refuses while invalid or already
    /// submitting, which is what keeps the submit button inert in both
    /// cases.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting || !self.validate() {
            return false;
        }
        self.submitting = true;
        true
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Rule;

    fn controller() -> FormController {
        let schema = Schema::new().field("name", &[Rule::Required]);
        let mut initial = FormValues::new();
        initial.insert("name", FieldValue::text(""));
        FormController::new(initial, schema)
    }

    #[test]
    fn test_new_validates_initial_values() {
        let c = controller();
        assert!(!c.is_valid());
        assert!(c.errors().scalar("name").is_some());
        assert!(!c.is_dirty());
    }

    #[test]
    fn test_set_field_value_revalidates() {
        let mut c = controller();
        c.set_field_value("name", FieldValue::text("Trattoria"));
        assert!(c.is_valid());
        assert!(c.errors().scalar("name").is_none());
        assert!(c.is_dirty());
    }

    #[test]
    fn test_begin_submit_blocked_while_invalid() {
        let mut c = controller();
        assert!(!c.begin_submit());
        assert!(!c.is_submitting());
    }

    #[test]
    fn test_begin_submit_blocked_while_submitting() {
        let mut c = controller();
        c.set_field_value("name", FieldValue::text("Trattoria"));
        assert!(c.begin_submit());
        assert!(!c.begin_submit());
        c.finish_submit();
        assert!(c.begin_submit());
    }
}

//! Declarative validation schemas
//!
//! A `Schema` describes one entity's field rules plus the sub-schemas of its
//! repeatable groups, and turns a `FormValues` into display-ready
//! `FieldErrors`. Schemas are invoked by the form controller, never by the
//! field components themselves.

use crate::state::forms::{FieldErrors, FieldValue, FormValues};

/// A single field rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Text must be non-empty, a relation must be selected, a number/date
    /// must be present
    Required,
    /// Number must have no fractional part
    Integer,
    /// Number must be zero or greater
    NonNegative,
}

impl Rule {
    /// Check one rule against a field's value (`None` when the field is
    /// absent from the values map). Returns the message suffix on failure.
    fn check(&self, value: Option<&FieldValue>) -> Option<&'static str> {
        match self {
            Rule::Required => match value {
                None => Some("is a required field"),
                Some(FieldValue::Text(s)) if s.trim().is_empty() => Some("is a required field"),
                Some(FieldValue::Relation(None)) => Some("is a required field"),
                Some(_) => None,
            },
            Rule::Integer => match value {
                Some(FieldValue::Number(n)) if n.fract() != 0.0 => Some("must be an integer"),
                _ => None,
            },
            Rule::NonNegative => match value {
                Some(FieldValue::Number(n)) if *n < 0.0 => Some("must not be negative"),
                _ => None,
            },
        }
    }
}

/// Per-entity validation schema
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, Vec<Rule>)>,
    groups: Vec<(String, Schema)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rules for one scalar or relation field
    pub fn field(mut self, name: impl Into<String>, rules: &[Rule]) -> Self {
        self.fields.push((name.into(), rules.to_vec()));
        self
    }

    /// Add a sub-schema applied to every row of a repeatable group
    pub fn group(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.groups.push((name.into(), schema));
        self
    }

    /// Validate a full values map, producing fresh display errors.
    ///
    /// Row errors are keyed by the row's position at validation time; the
    /// controller re-runs validation after every mutation so the indices can
    /// never refer to an out-of-date sequence.
    pub fn validate(&self, values: &FormValues) -> FieldErrors {
        let mut errors = FieldErrors::new();

        for (name, rules) in &self.fields {
            if let Some(message) = first_failure(rules, values.get(name)) {
                errors.insert_scalar(name.clone(), format!("{name} {message}"));
            }
        }

        for (group, schema) in &self.groups {
            for (index, row) in values.rows(group).iter().enumerate() {
                for (name, rules) in &schema.fields {
                    if let Some(message) = first_failure(rules, row.get(name)) {
                        errors.insert_row(
                            group.clone(),
                            index,
                            name.clone(),
                            format!("{name} {message}"),
                        );
                    }
                }
            }
        }

        errors
    }
}

fn first_failure(rules: &[Rule], value: Option<&FieldValue>) -> Option<&'static str> {
    rules.iter().find_map(|rule| rule.check(value))
}

//! Async relation selection
//!
//! A `RelationPicker` is created when the user activates a relation field
//! and dropped when the overlay closes. Its fetch runs once per instance
//! (plus explicit refreshes); completions are delivered back through the
//! main loop as `FetchOutcome`s and checked against the generation that was
//! current when the fetch was dispatched, so a stale response can neither
//! overwrite fresher options nor reach a picker that no longer exists.

use super::{group::update_row_field, FieldValue, FormController};
use serde::{Deserialize, Serialize};

/// A candidate record offered by a foreign-entity lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationOption {
    pub id: String,
    pub label: String,
}

impl RelationOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Where the chosen identifier is written in the form values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerBinding {
    Scalar {
        field: String,
    },
    Row {
        group: String,
        index: usize,
        field: String,
    },
}

/// Option loading lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Completion of one relation fetch, delivered over the app's event channel
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<Vec<RelationOption>, String>,
}

#[derive(Debug, Clone)]
pub struct RelationPicker {
    binding: PickerBinding,
    pub label: String,
    options: Vec<RelationOption>,
    state: LoadState,
    generation: u64,
    pub highlighted: usize,
}

impl RelationPicker {
    pub fn new(binding: PickerBinding, label: impl Into<String>) -> Self {
        Self {
            binding,
            label: label.into(),
            options: Vec::new(),
            state: LoadState::Idle,
            generation: 0,
            highlighted: 0,
        }
    }

    pub fn binding(&self) -> &PickerBinding {
        &self.binding
    }

    /// Mark a fetch in flight under `generation`. The caller hands out
    /// monotonically increasing generations so two picker instances can
    /// never collide.
    pub fn begin_load(&mut self, generation: u64) {
        self.generation = generation;
        self.state = LoadState::Loading;
    }

    /// Apply a fetch completion. Anything not carrying the current
    /// generation is a superseded request and is dropped on the floor.
    pub fn resolve(&mut self, generation: u64, result: Result<Vec<RelationOption>, String>) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "stale option fetch dropped");
            return;
        }
        match result {
            Ok(options) => {
                self.options = options;
                self.state = LoadState::Loaded;
                if self.highlighted >= self.options.len() {
                    self.highlighted = self.options.len().saturating_sub(1);
                }
            }
            Err(message) => {
                self.state = LoadState::Failed(message);
            }
        }
    }

    pub fn options(&self) -> &[RelationOption] {
        &self.options
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn highlight_next(&mut self) {
        if !self.options.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.options.len();
        }
    }

    pub fn highlight_prev(&mut self) {
        if self.options.is_empty() {
            return;
        }
        if self.highlighted == 0 {
            self.highlighted = self.options.len() - 1;
        } else {
            self.highlighted -= 1;
        }
    }

    pub fn highlighted_option(&self) -> Option<&RelationOption> {
        self.options.get(self.highlighted)
    }

    /// Move the highlight onto the option matching the currently selected
    /// identifier, if any. Used when opening the picker over an edit form.
    pub fn highlight_current(&mut self, selected: Option<&str>) {
        if let Some(id) = selected {
            if let Some(pos) = self.options.iter().position(|o| o.id == id) {
                self.highlighted = pos;
            }
        }
    }

    /// Write the highlighted option's identifier into the form values
    /// through the controller. Returns false when nothing is highlighted
    /// (still loading, failed, or an empty candidate set).
    pub fn apply_selection(&self, controller: &mut FormController) -> bool {
        let Some(option) = self.highlighted_option() else {
            return false;
        };
        let value = FieldValue::Relation(Some(option.id.clone()));
        match &self.binding {
            PickerBinding::Scalar { field } => controller.set_field_value(field, value),
            PickerBinding::Row {
                group,
                index,
                field,
            } => update_row_field(controller, group, *index, field, value),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{FormValues, RowDraft};
    use crate::validation::Schema;

    fn users() -> Vec<RelationOption> {
        vec![
            RelationOption::new("u1", "ana@example.com"),
            RelationOption::new("u2", "ben@example.com"),
        ]
    }

    fn scalar_picker() -> RelationPicker {
        RelationPicker::new(
            PickerBinding::Scalar {
                field: "owner_id".into(),
            },
            "Owner",
        )
    }

    fn controller() -> FormController {
        let mut initial = FormValues::new();
        initial.insert("owner_id", FieldValue::Relation(None));
        FormController::new(initial, Schema::new())
    }

    #[test]
    fn test_starts_idle_and_empty() {
        let picker = scalar_picker();
        assert_eq!(picker.load_state(), &LoadState::Idle);
        assert!(picker.options().is_empty());
        assert!(picker.highlighted_option().is_none());
    }

    #[test]
    fn test_resolve_populates_options() {
        let mut picker = scalar_picker();
        picker.begin_load(1);
        assert_eq!(picker.load_state(), &LoadState::Loading);

        picker.resolve(1, Ok(users()));
        assert_eq!(picker.load_state(), &LoadState::Loaded);
        assert_eq!(picker.options().len(), 2);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut picker = scalar_picker();
        picker.begin_load(1);
        picker.begin_load(2);

        // The superseded fetch completes after the refresh was dispatched
        picker.resolve(1, Ok(vec![RelationOption::new("old", "old")]));
        assert_eq!(picker.load_state(), &LoadState::Loading);
        assert!(picker.options().is_empty());

        picker.resolve(2, Ok(users()));
        assert_eq!(picker.options().len(), 2);
    }

    #[test]
    fn test_failure_becomes_display_state() {
        let mut picker = scalar_picker();
        picker.begin_load(1);
        picker.resolve(1, Err("backend unavailable".into()));
        assert_eq!(
            picker.load_state(),
            &LoadState::Failed("backend unavailable".into())
        );
    }

    #[test]
    fn test_refresh_after_failure_clears_error() {
        let mut picker = scalar_picker();
        picker.begin_load(1);
        picker.resolve(1, Err("boom".into()));
        picker.begin_load(2);
        picker.resolve(2, Ok(users()));
        assert_eq!(picker.load_state(), &LoadState::Loaded);
        assert_eq!(picker.options().len(), 2);
    }

    #[test]
    fn test_highlight_wraps_both_ways() {
        let mut picker = scalar_picker();
        picker.begin_load(1);
        picker.resolve(1, Ok(users()));

        picker.highlight_next();
        assert_eq!(picker.highlighted, 1);
        picker.highlight_next();
        assert_eq!(picker.highlighted, 0);
        picker.highlight_prev();
        assert_eq!(picker.highlighted, 1);
    }

    #[test]
    fn test_highlight_current_finds_selected_id() {
        let mut picker = scalar_picker();
        picker.begin_load(1);
        picker.resolve(1, Ok(users()));
        picker.highlight_current(Some("u2"));
        assert_eq!(picker.highlighted, 1);
        picker.highlight_current(Some("missing"));
        assert_eq!(picker.highlighted, 1);
    }

    #[test]
    fn test_apply_selection_writes_through_controller() {
        let mut picker = scalar_picker();
        let mut c = controller();
        picker.begin_load(1);

        // Field is unset until a selection is made
        assert_eq!(c.values().relation("owner_id"), None);

        picker.resolve(1, Ok(users()));
        assert_eq!(picker.options().len(), 2);

        picker.highlight_next(); // u2
        assert!(picker.apply_selection(&mut c));
        assert_eq!(c.values().relation("owner_id"), Some("u2"));
    }

    #[test]
    fn test_apply_selection_while_loading_is_refused() {
        let picker = scalar_picker();
        let mut c = controller();
        assert!(!picker.apply_selection(&mut c));
        assert_eq!(c.values().relation("owner_id"), None);
    }

    #[test]
    fn test_second_selection_wins_over_late_first_fetch() {
        let mut picker = scalar_picker();
        let mut c = controller();

        picker.begin_load(1);
        picker.resolve(1, Ok(users()));
        picker.highlighted = 0;
        picker.apply_selection(&mut c); // select u1

        // User refreshes and selects u2; afterwards the generation-1
        // response straggles in.
        picker.begin_load(2);
        picker.resolve(2, Ok(users()));
        picker.highlighted = 1;
        picker.apply_selection(&mut c); // select u2

        picker.resolve(1, Ok(vec![RelationOption::new("u9", "stale")]));
        assert_eq!(c.values().relation("owner_id"), Some("u2"));
        assert_eq!(picker.options().len(), 2);
    }

    #[test]
    fn test_row_binding_writes_into_group_row() {
        let mut fields = FormValues::new();
        fields.insert("role", FieldValue::text("chef"));
        fields.insert("user_id", FieldValue::Relation(None));
        let row = RowDraft::new(fields);

        let mut initial = FormValues::new();
        initial.insert("employee", FieldValue::Rows(vec![row.fresh_copy(), row]));
        let mut c = FormController::new(initial, Schema::new());

        let mut picker = RelationPicker::new(
            PickerBinding::Row {
                group: "employee".into(),
                index: 1,
                field: "user_id".into(),
            },
            "user",
        );
        picker.begin_load(1);
        picker.resolve(1, Ok(users()));
        assert!(picker.apply_selection(&mut c));

        let rows = c.values().rows("employee");
        assert_eq!(rows[0].fields.relation("user_id"), None);
        assert_eq!(rows[1].fields.relation("user_id"), Some("u1"));
        assert_eq!(rows[1].fields.text("role"), "chef");
    }
}

//! Application state definitions

use crate::entities::EntityKind;
use crate::state::forms::FormValues;
use crate::state::session::FormSession;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    List,
    Form,
}

/// One persisted entity instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub values: FormValues,
}

impl Record {
    /// Value shown for this record in tables and dialogs
    pub fn display(&self, kind: EntityKind) -> String {
        let label = self
            .values
            .get(kind.display_field())
            .map(|v| v.display_value())
            .unwrap_or_default();
        if label.is_empty() {
            self.id.clone()
        } else {
            label
        }
    }
}

/// Delete awaiting confirmation
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub kind: EntityKind,
    pub id: String,
    pub display: String,
    /// false = Cancel highlighted, true = Delete highlighted
    pub selected_option: bool,
}

/// Top-level mutable state
pub struct AppState {
    pub current_view: View,
    pub current_entity: EntityKind,
    pub backend_connected: bool,
    pub records: HashMap<EntityKind, Vec<Record>>,
    pub selected_index: usize,
    pub form: Option<FormSession>,
    pub pending_delete: Option<PendingDelete>,
    errors: VecDeque<String>,
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_view: View::List,
            current_entity: EntityKind::Restaurant,
            backend_connected: false,
            records: HashMap::new(),
            selected_index: 0,
            form: None,
            pending_delete: None,
            errors: VecDeque::new(),
            status_message: None,
        }
    }
}

impl AppState {
    pub fn current_records(&self) -> &[Record] {
        self.records
            .get(&self.current_entity)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.current_records().get(self.selected_index)
    }

    pub fn select_next(&mut self) {
        let len = self.current_records().len();
        if len > 0 && self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Switch the sidebar entity; list selection restarts at the top
    pub fn set_entity(&mut self, kind: EntityKind) {
        if self.current_entity != kind {
            self.current_entity = kind;
            self.selected_index = 0;
        }
    }

    /// Keep the selection inside the list after records are reloaded
    pub fn clamp_selection(&mut self) {
        let len = self.current_records().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FieldValue;

    fn record(id: &str, name: &str) -> Record {
        let mut values = FormValues::new();
        values.insert("name", FieldValue::text(name));
        Record {
            id: id.into(),
            values,
        }
    }

    #[test]
    fn test_default_starts_on_restaurant_list() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::List);
        assert_eq!(state.current_entity, EntityKind::Restaurant);
        assert!(state.current_records().is_empty());
    }

    #[test]
    fn test_record_display_falls_back_to_id() {
        let r = record("r1", "");
        assert_eq!(r.display(EntityKind::Restaurant), "r1");
        let r = record("r2", "Harborside");
        assert_eq!(r.display(EntityKind::Restaurant), "Harborside");
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = AppState::default();
        state
            .records
            .insert(EntityKind::Restaurant, vec![record("a", "A"), record("b", "B")]);

        state.select_next();
        assert_eq!(state.selected_index, 1);
        state.select_next();
        assert_eq!(state.selected_index, 1);
        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_set_entity_resets_selection() {
        let mut state = AppState::default();
        state
            .records
            .insert(EntityKind::Restaurant, vec![record("a", "A"), record("b", "B")]);
        state.select_next();
        state.set_entity(EntityKind::User);
        assert_eq!(state.selected_index, 0);
        // Switching to the same entity keeps the selection
        state.set_entity(EntityKind::User);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_clamp_selection_after_shrink() {
        let mut state = AppState::default();
        state
            .records
            .insert(EntityKind::Restaurant, vec![record("a", "A"), record("b", "B")]);
        state.selected_index = 1;
        state.records.insert(EntityKind::Restaurant, vec![record("a", "A")]);
        state.clamp_selection();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        state.push_error("first");
        state.push_error("second");
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(state.current_error().is_none());
    }
}

//! One open create/edit form page
//!
//! Ties a form spec, its controller, and the focus cursor together, and
//! routes key input to whichever field is active. The flattened focus order
//! is: scalar fields, then every group's rows and add-row button, then the
//! submit/cancel buttons row.

use crate::entities::{EntityKind, FieldKind, FieldSpec, FormSpec};
use crate::state::forms::{
    FieldValue, FormController, FormValues, PickerBinding, RelationPicker, RowDraft, RowGroup,
};
use crate::state::Record;
use chrono::NaiveDate;

const DATE_INPUT_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// One focusable position in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusStop {
    /// Index into `spec.fields`
    Scalar(usize),
    /// Indices into `spec.groups`, the group's row sequence, and the
    /// group's field list
    RowField { group: usize, row: usize, field: usize },
    /// The group's add-row button
    AddRow(usize),
    /// The submit/cancel buttons row
    Buttons,
}

pub struct FormSession {
    pub kind: EntityKind,
    pub mode: FormMode,
    pub spec: FormSpec,
    pub controller: FormController,
    pub cursor: usize,
    /// 0 = Submit, 1 = Cancel
    pub selected_button: usize,
    pub picker: Option<RelationPicker>,
    /// Entity kind the open picker fetches candidates from
    pub picker_target: Option<EntityKind>,
    /// Transient text while a number or date field is being typed into;
    /// committed on focus change or submit
    edit_buffer: Option<String>,
}

impl FormSession {
    pub fn create(kind: EntityKind) -> Self {
        let spec = kind.form_spec();
        let controller = FormController::new(spec.defaults(), spec.schema.clone());
        Self {
            kind,
            mode: FormMode::Create,
            spec,
            controller,
            cursor: 0,
            selected_button: 0,
            picker: None,
            picker_target: None,
            edit_buffer: None,
        }
    }

    /// Open an edit form hydrated from a fetched record. Values outside the
    /// declared spec are dropped, missing ones get defaults, and group rows
    /// are rebuilt with fresh transient identities.
    pub fn edit(kind: EntityKind, record: &Record) -> Self {
        let spec = kind.form_spec();
        let values = hydrate(&spec, &record.values);
        let controller = FormController::new(values, spec.schema.clone());
        Self {
            kind,
            mode: FormMode::Edit {
                id: record.id.clone(),
            },
            spec,
            controller,
            cursor: 0,
            selected_button: 0,
            picker: None,
            picker_target: None,
            edit_buffer: None,
        }
    }

    pub fn title(&self) -> String {
        match &self.mode {
            FormMode::Create => format!("Create {}", self.kind.label()),
            FormMode::Edit { .. } => format!("Edit {}", self.kind.label()),
        }
    }

    /// Flattened focus order, recomputed on demand because row counts
    /// change while the form is open
    pub fn stops(&self) -> Vec<FocusStop> {
        let mut stops = Vec::new();
        for index in 0..self.spec.fields.len() {
            stops.push(FocusStop::Scalar(index));
        }
        for (group_index, group) in self.spec.groups.iter().enumerate() {
            let rows = self.controller.values().rows(group.name).len();
            for row in 0..rows {
                for field in 0..group.fields.len() {
                    stops.push(FocusStop::RowField {
                        group: group_index,
                        row,
                        field,
                    });
                }
            }
            stops.push(FocusStop::AddRow(group_index));
        }
        stops.push(FocusStop::Buttons);
        stops
    }

    pub fn active_stop(&self) -> FocusStop {
        let stops = self.stops();
        stops[self.cursor.min(stops.len() - 1)]
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_stop() == FocusStop::Buttons
    }

    fn active_field_spec(&self) -> Option<&FieldSpec> {
        match self.active_stop() {
            FocusStop::Scalar(index) => self.spec.fields.get(index),
            FocusStop::RowField { group, field, .. } => self
                .spec
                .groups
                .get(group)
                .and_then(|g| g.fields.get(field)),
            _ => None,
        }
    }

    pub fn active_field_kind(&self) -> Option<FieldKind> {
        self.active_field_spec().map(|f| f.kind)
    }

    pub fn next_field(&mut self) {
        self.commit_edit_buffer();
        let count = self.stops().len();
        self.cursor = (self.cursor.min(count - 1) + 1) % count;
    }

    pub fn prev_field(&mut self) {
        self.commit_edit_buffer();
        let count = self.stops().len();
        let current = self.cursor.min(count - 1);
        self.cursor = if current == 0 { count - 1 } else { current - 1 };
    }

    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % 2;
    }

    /// Current value of the active field, for rendering and buffer seeding
    fn active_value(&self) -> Option<FieldValue> {
        match self.active_stop() {
            FocusStop::Scalar(index) => {
                let name = self.spec.fields.get(index)?.name;
                self.controller.get(name).cloned()
            }
            FocusStop::RowField { group, row, field } => {
                let group_spec = self.spec.groups.get(group)?;
                let name = group_spec.fields.get(field)?.name;
                self.controller
                    .values()
                    .rows(group_spec.name)
                    .get(row)?
                    .get(name)
                    .cloned()
            }
            _ => None,
        }
    }

    fn write_active(&mut self, value: FieldValue) {
        match self.active_stop() {
            FocusStop::Scalar(index) => {
                if let Some(field) = self.spec.fields.get(index) {
                    self.controller.set_field_value(field.name, value);
                }
            }
            FocusStop::RowField { group, row, field } => {
                if let Some(group_spec) = self.spec.groups.get(group) {
                    if let Some(field_spec) = group_spec.fields.get(field) {
                        let editor = group_spec.row_group();
                        editor.update_field(&mut self.controller, row, field_spec.name, value);
                    }
                }
            }
            _ => {}
        }
    }

    /// Route a typed character to the active field
    pub fn handle_char(&mut self, c: char) {
        match self.active_field_kind() {
            Some(FieldKind::Text) => {
                if let Some(mut value) = self.active_value() {
                    value.push_char(c);
                    self.write_active(value);
                }
            }
            Some(FieldKind::Number) => {
                if c.is_ascii_digit() || c == '.' || c == '-' {
                    self.edit_buffer_mut().push(c);
                }
            }
            Some(FieldKind::Date) => {
                if c.is_ascii_digit() || c == '/' {
                    self.edit_buffer_mut().push(c);
                }
            }
            _ => {}
        }
    }

    /// Reset the active field to its kind's empty value and drop any
    /// half-typed input for it
    pub fn clear_active_field(&mut self) {
        self.edit_buffer = None;
        if let Some(mut value) = self.active_value() {
            value.clear();
            self.write_active(value);
        }
    }

    pub fn handle_backspace(&mut self) {
        match self.active_field_kind() {
            Some(FieldKind::Text) => {
                if let Some(mut value) = self.active_value() {
                    value.pop_char();
                    self.write_active(value);
                }
            }
            Some(FieldKind::Number) | Some(FieldKind::Date) => {
                self.edit_buffer_mut().pop();
            }
            _ => {}
        }
    }

    fn edit_buffer_mut(&mut self) -> &mut String {
        if self.edit_buffer.is_none() {
            let seed = self
                .active_value()
                .map(|v| v.display_value())
                .unwrap_or_default();
            self.edit_buffer = Some(seed);
        }
        self.edit_buffer.get_or_insert_with(String::new)
    }

    /// Text shown for the active field while it is being edited
    pub fn edit_buffer(&self) -> Option<&str> {
        self.edit_buffer.as_deref()
    }

    /// Parse and write back the pending number/date input, if any.
    /// Unparseable numbers fall back to zero; unparseable dates leave the
    /// stored value untouched.
    pub fn commit_edit_buffer(&mut self) {
        let Some(buffer) = self.edit_buffer.take() else {
            return;
        };
        match self.active_field_kind() {
            Some(FieldKind::Number) => {
                let parsed = buffer.trim().parse::<f64>().unwrap_or(0.0);
                let parsed = if parsed.is_finite() { parsed } else { 0.0 };
                self.write_active(FieldValue::Number(parsed));
            }
            Some(FieldKind::Date) => {
                if let Ok(date) = NaiveDate::parse_from_str(buffer.trim(), DATE_INPUT_FORMAT) {
                    self.write_active(FieldValue::Date(date));
                }
            }
            _ => {}
        }
    }

    /// Append a row to the group owning the active add-row button
    pub fn append_row(&mut self) {
        if let FocusStop::AddRow(group) = self.active_stop() {
            if let Some(group_spec) = self.spec.groups.get(group) {
                let editor = group_spec.row_group();
                editor.append(&mut self.controller);
                // Land on the first field of the new row
                let row = editor.row_count(&self.controller) - 1;
                self.cursor = self
                    .stops()
                    .iter()
                    .position(|s| {
                        *s == FocusStop::RowField {
                            group,
                            row,
                            field: 0,
                        }
                    })
                    .unwrap_or(self.cursor);
            }
        }
    }

    /// Remove the row under the cursor, if the cursor is on one
    pub fn remove_active_row(&mut self) {
        self.edit_buffer = None;
        if let FocusStop::RowField { group, row, .. } = self.active_stop() {
            if let Some(group_spec) = self.spec.groups.get(group) {
                group_spec.row_group().remove(&mut self.controller, row);
                let count = self.stops().len();
                self.cursor = self.cursor.min(count - 1);
            }
        }
    }

    pub fn row_group(&self, group: usize) -> Option<RowGroup> {
        self.spec.groups.get(group).map(|g| g.row_group())
    }

    /// Open a relation picker over the active field. Returns the fetch
    /// target kind when the active field is a relation.
    pub fn open_picker(&mut self) -> Option<EntityKind> {
        self.commit_edit_buffer();
        let spec = self.active_field_spec()?;
        let FieldKind::Relation(target) = spec.kind else {
            return None;
        };
        let label = spec.label.to_string();
        let binding = match self.active_stop() {
            FocusStop::Scalar(_) => PickerBinding::Scalar {
                field: spec.name.to_string(),
            },
            FocusStop::RowField { group, row, field } => {
                let group_spec = self.spec.groups.get(group)?;
                PickerBinding::Row {
                    group: group_spec.name.to_string(),
                    index: row,
                    field: group_spec.fields.get(field)?.name.to_string(),
                }
            }
            _ => return None,
        };
        self.picker = Some(RelationPicker::new(binding, label));
        self.picker_target = Some(target);
        Some(target)
    }

    pub fn close_picker(&mut self) {
        self.picker = None;
        self.picker_target = None;
    }

    /// Identifier currently stored at a picker binding, used to highlight
    /// the existing selection when options arrive
    pub fn bound_relation(&self, binding: &PickerBinding) -> Option<String> {
        match binding {
            PickerBinding::Scalar { field } => self
                .controller
                .values()
                .relation(field)
                .map(str::to_string),
            PickerBinding::Row {
                group,
                index,
                field,
            } => self
                .controller
                .values()
                .rows(group)
                .get(*index)?
                .fields
                .relation(field)
                .map(str::to_string),
        }
    }
}

/// Merge fetched values into the spec's shape: unknown fields are dropped,
/// missing fields get defaults, and rows are rebuilt field-by-field so
/// their transient identities are fresh and their field sets declared.
fn hydrate(spec: &FormSpec, fetched: &FormValues) -> FormValues {
    let mut values = spec.defaults();
    for field in &spec.fields {
        if let Some(value) = fetched.get(field.name) {
            values.insert(field.name, value.clone());
        }
    }
    for group in &spec.groups {
        let rows: Vec<RowDraft> = fetched
            .rows(group.name)
            .iter()
            .map(|fetched_row| {
                let mut row = group.template();
                for field in &group.fields {
                    if let Some(value) = fetched_row.get(field.name) {
                        row.set(field.name, value.clone());
                    }
                }
                row
            })
            .collect();
        values.insert(group.name, FieldValue::Rows(rows));
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory_create() -> FormSession {
        FormSession::create(EntityKind::Inventory)
    }

    fn restaurant_create() -> FormSession {
        FormSession::create(EntityKind::Restaurant)
    }

    #[test]
    fn test_create_starts_at_first_field() {
        let session = inventory_create();
        assert_eq!(session.cursor, 0);
        assert_eq!(session.active_stop(), FocusStop::Scalar(0));
        assert_eq!(session.title(), "Create Inventory");
    }

    #[test]
    fn test_stops_end_with_buttons() {
        let session = inventory_create();
        let stops = session.stops();
        assert_eq!(*stops.last().unwrap(), FocusStop::Buttons);
        // Four scalar/relation fields, no groups
        assert_eq!(stops.len(), 5);
    }

    #[test]
    fn test_restaurant_stops_include_group_add_buttons() {
        let session = restaurant_create();
        let stops = session.stops();
        let add_buttons = stops
            .iter()
            .filter(|s| matches!(s, FocusStop::AddRow(_)))
            .count();
        assert_eq!(add_buttons, 6);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut session = inventory_create();
        for _ in 0..session.stops().len() {
            session.next_field();
        }
        assert_eq!(session.cursor, 0);
        session.prev_field();
        assert_eq!(session.active_stop(), FocusStop::Buttons);
    }

    #[test]
    fn test_typed_text_lands_in_values() {
        let mut session = inventory_create();
        for c in "flour".chars() {
            session.handle_char(c);
        }
        assert_eq!(session.controller.values().text("ingredient_name"), "flour");
        session.handle_backspace();
        assert_eq!(session.controller.values().text("ingredient_name"), "flou");
    }

    #[test]
    fn test_clear_active_field() {
        let mut session = inventory_create();
        for c in "flour".chars() {
            session.handle_char(c);
        }
        session.clear_active_field();
        assert_eq!(session.controller.values().text("ingredient_name"), "");
    }

    #[test]
    fn test_number_input_commits_on_focus_change() {
        let mut session = inventory_create();
        session.next_field(); // quantity
        assert_eq!(session.active_stop(), FocusStop::Scalar(1));
        session.handle_backspace(); // clears the seeded "0"
        session.handle_char('4');
        session.handle_char('2');
        // Nothing written until the buffer commits
        assert_eq!(session.controller.values().number("quantity"), 0.0);
        session.next_field();
        assert_eq!(session.controller.values().number("quantity"), 42.0);
    }

    #[test]
    fn test_unparseable_number_falls_back_to_zero() {
        let mut session = inventory_create();
        session.next_field(); // quantity
        session.handle_char('-');
        session.handle_char('.');
        session.handle_char('-');
        session.commit_edit_buffer();
        assert_eq!(session.controller.values().number("quantity"), 0.0);
    }

    #[test]
    fn test_date_input_commits_valid_and_keeps_invalid() {
        let mut session = FormSession::create(EntityKind::Promotion);
        // title, description, start_date
        session.next_field();
        session.next_field();
        assert_eq!(session.active_field_kind(), Some(FieldKind::Date));
        let before = session.controller.values().date("start_date").unwrap();

        for _ in 0..10 {
            session.handle_backspace();
        }
        for c in "bad".chars() {
            session.handle_char(c); // non-digits ignored
        }
        session.commit_edit_buffer();
        assert_eq!(session.controller.values().date("start_date"), Some(before));

        for _ in 0..10 {
            session.handle_backspace();
        }
        for c in "01/02/2025".chars() {
            session.handle_char(c);
        }
        session.commit_edit_buffer();
        assert_eq!(
            session.controller.values().date("start_date"),
            Some(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap())
        );
    }

    #[test]
    fn test_append_row_moves_cursor_into_new_row() {
        let mut session = restaurant_create();
        // Move to the first add-row button (after name and owner_id)
        session.cursor = 2;
        assert_eq!(session.active_stop(), FocusStop::AddRow(0));
        session.append_row();
        assert_eq!(
            session.active_stop(),
            FocusStop::RowField {
                group: 0,
                row: 0,
                field: 0
            }
        );
        assert_eq!(session.controller.values().rows("employee").len(), 1);
    }

    #[test]
    fn test_remove_active_row_clamps_cursor() {
        let mut session = restaurant_create();
        session.cursor = 2;
        session.append_row();
        session.remove_active_row();
        assert!(session.controller.values().rows("employee").is_empty());
        let stops = session.stops();
        assert!(session.cursor < stops.len());
    }

    #[test]
    fn test_open_picker_on_scalar_relation() {
        let mut session = restaurant_create();
        session.next_field(); // owner_id
        let target = session.open_picker();
        assert_eq!(target, Some(EntityKind::User));
        let picker = session.picker.as_ref().unwrap();
        assert_eq!(
            picker.binding(),
            &PickerBinding::Scalar {
                field: "owner_id".into()
            }
        );
    }

    #[test]
    fn test_open_picker_on_row_relation() {
        let mut session = restaurant_create();
        session.cursor = 2;
        session.append_row(); // employee row 0, field 0 (role)
        session.next_field(); // permissions
        session.next_field(); // user_id
        let target = session.open_picker();
        assert_eq!(target, Some(EntityKind::User));
        assert_eq!(
            session.picker.as_ref().unwrap().binding(),
            &PickerBinding::Row {
                group: "employee".into(),
                index: 0,
                field: "user_id".into()
            }
        );
    }

    #[test]
    fn test_open_picker_on_text_field_is_refused() {
        let mut session = restaurant_create();
        assert_eq!(session.open_picker(), None);
        assert!(session.picker.is_none());
    }

    #[test]
    fn test_edit_hydration_drops_unknown_and_refreshes_row_ids() {
        let mut fetched = FormValues::new();
        fetched.insert("name", FieldValue::text("Harborside"));
        fetched.insert("legacy_field", FieldValue::text("dropped"));
        let mut row_fields = FormValues::new();
        row_fields.insert("role", FieldValue::text("chef"));
        row_fields.insert("mystery", FieldValue::text("dropped"));
        let fetched_row = RowDraft::new(row_fields);
        let original_row_id = fetched_row.row_id;
        fetched.insert("employee", FieldValue::Rows(vec![fetched_row]));

        let record = Record {
            id: "r1".into(),
            values: fetched,
        };
        let session = FormSession::edit(EntityKind::Restaurant, &record);

        let values = session.controller.values();
        assert_eq!(values.text("name"), "Harborside");
        assert!(values.get("legacy_field").is_none());
        let rows = values.rows("employee");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fields.text("role"), "chef");
        assert!(rows[0].get("mystery").is_none());
        assert!(rows[0].get("user_id").is_some());
        assert_ne!(rows[0].row_id, original_row_id);
        assert_eq!(session.mode, FormMode::Edit { id: "r1".into() });
    }

    #[test]
    fn test_bound_relation_reads_through_bindings() {
        let mut session = restaurant_create();
        session
            .controller
            .set_field_value("owner_id", FieldValue::Relation(Some("u7".into())));
        assert_eq!(
            session.bound_relation(&PickerBinding::Scalar {
                field: "owner_id".into()
            }),
            Some("u7".into())
        );
        assert_eq!(
            session.bound_relation(&PickerBinding::Row {
                group: "employee".into(),
                index: 0,
                field: "user_id".into()
            }),
            None
        );
    }
}

//! Application state and core logic

use crate::backend::BackendClient;
use crate::config::TuiConfig;
use crate::entities::{EntityKind, FieldKind};
use crate::state::forms::FetchOutcome;
use crate::state::{AppState, FocusStop, FormMode, FormSession, PendingDelete, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Store client behind the trait boundary
    backend: Arc<dyn BackendClient>,
    /// Sender handed to spawned option fetches
    fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
    /// Completions drained once per loop tick
    fetch_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    /// Monotonic generation source for option fetches
    fetch_seq: u64,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub async fn new(backend: Arc<dyn BackendClient>, config: TuiConfig) -> Result<Self> {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let mut state = AppState::default();
        if let Some(kind) = config
            .start_entity
            .as_deref()
            .and_then(EntityKind::from_key)
        {
            state.current_entity = kind;
        }
        state.backend_connected = backend.check_connection().await;

        let mut app = Self {
            state,
            backend,
            fetch_tx,
            fetch_rx,
            fetch_seq: 0,
            quit: false,
        };
        if app.state.backend_connected {
            app.reload_current_list().await;
        }
        Ok(app)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    async fn reload_current_list(&mut self) {
        let kind = self.state.current_entity;
        match self.backend.list(kind).await {
            Ok(records) => {
                self.state.records.insert(kind, records);
                self.state.clamp_selection();
            }
            Err(e) => {
                tracing::warn!(kind = kind.key(), error = %e, "list load failed");
                self.push_error(format!("Failed to load {}", kind.plural()));
            }
        }
    }

    /// Apply relation fetch completions delivered since the last tick
    pub fn drain_fetch_events(&mut self) {
        while let Ok(outcome) = self.fetch_rx.try_recv() {
            self.apply_fetch_outcome(outcome);
        }
    }

    /// Route one fetch completion to the open picker. A picker that has
    /// been closed, or a form that has been left, is simply no longer
    /// there: the result is dropped without touching any form values.
    fn apply_fetch_outcome(&mut self, outcome: FetchOutcome) {
        let Some(session) = self.state.form.as_mut() else {
            tracing::debug!("option fetch completed after its form closed");
            return;
        };
        let Some(picker) = session.picker.as_ref() else {
            tracing::debug!("option fetch completed after its picker closed");
            return;
        };
        let binding = picker.binding().clone();
        let current = session.bound_relation(&binding);
        if let Err(ref e) = outcome.result {
            tracing::warn!(error = %e, "relation options fetch failed");
        }
        if let Some(picker) = session.picker.as_mut() {
            picker.resolve(outcome.generation, outcome.result);
            picker.highlight_current(current.as_deref());
        }
    }

    /// Dispatch the open picker's fetch as a background task
    fn spawn_option_fetch(&mut self, target: EntityKind) {
        let Some(session) = self.state.form.as_mut() else {
            return;
        };
        let Some(picker) = session.picker.as_mut() else {
            return;
        };
        self.fetch_seq += 1;
        let generation = self.fetch_seq;
        picker.begin_load(generation);

        let backend = Arc::clone(&self.backend);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = backend
                .list_options(target)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(FetchOutcome { generation, result });
        });
    }

    /// Handle a key event based on the current view and overlays
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // The error dialog swallows input until dismissed
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.pending_delete.is_some() {
            return self.handle_delete_dialog_key(key).await;
        }

        let picker_open = self
            .state
            .form
            .as_ref()
            .is_some_and(|f| f.picker.is_some());
        if picker_open {
            self.handle_picker_key(key);
            return Ok(());
        }

        match self.state.current_view {
            View::List => self.handle_list_key(key).await,
            View::Form => self.handle_form_key(key).await,
        }
    }

    async fn handle_list_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit = true;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.select_next();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.select_prev();
            }
            KeyCode::Left | KeyCode::Char('[') => {
                self.cycle_entity(false).await;
            }
            KeyCode::Right | KeyCode::Char(']') => {
                self.cycle_entity(true).await;
            }
            KeyCode::Char(c @ '1'..='8') => {
                let index = (c as usize) - ('1' as usize);
                self.state.set_entity(EntityKind::ALL[index]);
                self.reload_current_list().await;
            }
            KeyCode::Char('r') => {
                self.reload_current_list().await;
                self.state.status_message = Some(format!("{} reloaded", self.state.current_entity.plural()));
            }
            KeyCode::Char('n') => {
                self.state.form = Some(FormSession::create(self.state.current_entity));
                self.state.current_view = View::Form;
                self.state.status_message = None;
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                let Some(id) = self.state.selected_record().map(|r| r.id.clone()) else {
                    return Ok(());
                };
                let kind = self.state.current_entity;
                // Hydrate from a fresh fetch rather than the cached list row
                match self.backend.get(kind, &id).await {
                    Ok(record) => {
                        self.state.form = Some(FormSession::edit(kind, &record));
                        self.state.current_view = View::Form;
                        self.state.status_message = None;
                    }
                    Err(e) => {
                        tracing::warn!(kind = kind.key(), id, error = %e, "record fetch failed");
                        self.push_error(format!("Failed to load {}", kind.label()));
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(record) = self.state.selected_record() {
                    self.state.pending_delete = Some(PendingDelete {
                        kind: self.state.current_entity,
                        id: record.id.clone(),
                        display: record.display(self.state.current_entity),
                        selected_option: false,
                    });
                }
            }
            KeyCode::Char('y') => {
                self.copy_selected_id();
            }
            _ => {}
        }
        Ok(())
    }

    async fn cycle_entity(&mut self, forward: bool) {
        let all = EntityKind::ALL;
        let current = all
            .iter()
            .position(|k| *k == self.state.current_entity)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % all.len()
        } else {
            (current + all.len() - 1) % all.len()
        };
        self.state.set_entity(all[next]);
        self.reload_current_list().await;
    }

    fn copy_selected_id(&mut self) {
        let Some(record) = self.state.selected_record() else {
            return;
        };
        let id = record.id.clone();
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(id.clone())) {
            Ok(()) => {
                self.state.status_message = Some(format!("Copied id {id}"));
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard copy failed");
                self.state.status_message = Some("Clipboard unavailable".to_string());
            }
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        // Save shortcut works from any field
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit_form().await;
            return Ok(());
        }
        if key.code == KeyCode::Char('d') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if let Some(session) = self.state.form.as_mut() {
                session.remove_active_row();
            }
            return Ok(());
        }
        if key.code == KeyCode::Char('u') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if let Some(session) = self.state.form.as_mut() {
                session.clear_active_field();
            }
            return Ok(());
        }

        let Some(session) = self.state.form.as_mut() else {
            return Ok(());
        };
        match key.code {
            KeyCode::Esc => {
                self.abandon_form();
            }
            KeyCode::Tab | KeyCode::Down => {
                session.next_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                session.prev_field();
            }
            KeyCode::Left | KeyCode::Right if session.is_buttons_row_active() => {
                session.next_button();
            }
            KeyCode::Enter => match session.active_stop() {
                FocusStop::Buttons => {
                    if session.selected_button == 0 {
                        self.submit_form().await;
                    } else {
                        self.abandon_form();
                    }
                }
                FocusStop::AddRow(_) => {
                    session.append_row();
                }
                _ => {
                    if matches!(session.active_field_kind(), Some(FieldKind::Relation(_))) {
                        if let Some(target) = session.open_picker() {
                            self.spawn_option_fetch(target);
                        }
                    } else {
                        session.next_field();
                    }
                }
            },
            KeyCode::Backspace => {
                session.handle_backspace();
            }
            KeyCode::Char(c) => {
                session.handle_char(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let Some(session) = self.state.form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                session.close_picker();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(picker) = session.picker.as_mut() {
                    picker.highlight_next();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(picker) = session.picker.as_mut() {
                    picker.highlight_prev();
                }
            }
            KeyCode::Char('r') => {
                if let Some(target) = session.picker_target {
                    self.spawn_option_fetch(target);
                }
            }
            KeyCode::Enter => {
                let applied = if let Some(picker) = session.picker.take() {
                    let applied = picker.apply_selection(&mut session.controller);
                    if !applied {
                        // Nothing selectable yet; keep the overlay open
                        session.picker = Some(picker);
                    }
                    applied
                } else {
                    false
                };
                if applied {
                    session.picker_target = None;
                }
            }
            _ => {}
        }
    }

    async fn handle_delete_dialog_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(pending) = self.state.pending_delete.as_mut() else {
            return Ok(());
        };
        match key.code {
            KeyCode::Esc => {
                self.state.pending_delete = None;
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                pending.selected_option = !pending.selected_option;
            }
            KeyCode::Enter => {
                let Some(pending) = self.state.pending_delete.take() else {
                    return Ok(());
                };
                if pending.selected_option {
                    match self.backend.delete(pending.kind, &pending.id).await {
                        Ok(()) => {
                            self.state.status_message =
                                Some(format!("{} deleted", pending.kind.label()));
                            self.reload_current_list().await;
                        }
                        Err(e) => {
                            tracing::warn!(kind = pending.kind.key(), error = %e, "delete failed");
                            self.push_error(format!("Failed to delete {}", pending.kind.label()));
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Close the open form without saving
    fn abandon_form(&mut self) {
        if let Some(session) = self.state.form.take() {
            if session.controller.is_dirty() {
                self.state.status_message = Some("Changes discarded".to_string());
            }
        }
        self.state.current_view = View::List;
    }

    /// Validate and persist the open form. Submission is refused while
    /// validation errors exist or another submit is in flight.
    async fn submit_form(&mut self) {
        let Some(session) = self.state.form.as_mut() else {
            return;
        };
        session.commit_edit_buffer();
        if !session.controller.begin_submit() {
            let count = session.controller.errors().len();
            if count > 0 {
                self.state.status_message =
                    Some(format!("{count} validation error(s) to fix"));
            }
            return;
        }
        let kind = session.kind;
        let mode = session.mode.clone();
        let values = session.controller.values().clone();
        tracing::debug!(
            kind = kind.key(),
            fields = values.field_count(),
            "submitting form"
        );

        let result = match &mode {
            FormMode::Create => self.backend.create(kind, values).await.map(|_| "created"),
            FormMode::Edit { id } => self.backend.update(kind, id, values).await.map(|()| "updated"),
        };

        match result {
            Ok(verb) => {
                self.state.form = None;
                self.state.current_view = View::List;
                self.state.status_message = Some(format!("{} {verb}", kind.label()));
                self.reload_current_list().await;
            }
            Err(e) => {
                tracing::warn!(kind = kind.key(), error = %e, "save failed");
                if let Some(session) = self.state.form.as_mut() {
                    session.controller.finish_submit();
                }
                self.push_error(format!("Failed to save {}", kind.label()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackendClient;
    use crate::state::forms::{FieldValue, FormValues, RelationOption};
    use crate::state::Record;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn restaurant_record(id: &str, name: &str) -> Record {
        let mut values = FormValues::new();
        values.insert("name", FieldValue::text(name));
        Record {
            id: id.into(),
            values,
        }
    }

    fn connected_mock() -> MockBackendClient {
        let mut mock = MockBackendClient::new();
        mock.expect_check_connection().returning(|| true);
        mock.expect_list()
            .returning(|_| Ok(vec![restaurant_record("r1", "Harborside")]));
        mock.expect_get()
            .returning(|_, id| Ok(restaurant_record(id, "Harborside")));
        // Opening a picker dispatches a background fetch; tests drive the
        // picker by applying outcomes directly, so the spawned fetch only
        // needs somewhere harmless to land.
        mock.expect_list_options().returning(|_| Ok(vec![]));
        mock
    }

    async fn app_with(mock: MockBackendClient) -> App {
        App::new(Arc::new(mock), TuiConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_new_loads_initial_list() {
        let app = app_with(connected_mock()).await;
        assert!(app.state.backend_connected);
        assert_eq!(app.state.current_records().len(), 1);
    }

    #[tokio::test]
    async fn test_disconnected_backend_skips_initial_load() {
        let mut mock = MockBackendClient::new();
        mock.expect_check_connection().returning(|| false);
        let app = app_with(mock).await;
        assert!(!app.state.backend_connected);
        assert!(app.state.current_records().is_empty());
    }

    #[tokio::test]
    async fn test_start_entity_from_config() {
        let mut mock = MockBackendClient::new();
        mock.expect_check_connection().returning(|| true);
        mock.expect_list().returning(|_| Ok(vec![]));
        let config = TuiConfig {
            start_entity: Some("menu_item".into()),
        };
        let app = App::new(Arc::new(mock), config).await.unwrap();
        assert_eq!(app.state.current_entity, EntityKind::MenuItem);
    }

    #[tokio::test]
    async fn test_n_opens_create_form() {
        let mut app = app_with(connected_mock()).await;
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(app.state.current_view, View::Form);
        let session = app.state.form.as_ref().unwrap();
        assert_eq!(session.mode, FormMode::Create);
        assert_eq!(session.kind, EntityKind::Restaurant);
    }

    #[tokio::test]
    async fn test_enter_opens_edit_form_for_selection() {
        let mut app = app_with(connected_mock()).await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        let session = app.state.form.as_ref().unwrap();
        assert_eq!(session.mode, FormMode::Edit { id: "r1".into() });
        assert_eq!(session.controller.values().text("name"), "Harborside");
    }

    #[tokio::test]
    async fn test_esc_abandons_form() {
        let mut app = app_with(connected_mock()).await;
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(app.state.form.is_none());
        assert_eq!(app.state.current_view, View::List);
    }

    #[tokio::test]
    async fn test_submit_blocked_while_invalid() {
        // No expect_create: a create call would panic the mock
        let mut app = app_with(connected_mock()).await;
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        app.handle_key(ctrl('s')).await.unwrap();
        assert!(app.state.form.is_some(), "form must stay open");
        assert!(app
            .state
            .status_message
            .as_deref()
            .unwrap()
            .contains("validation"));
    }

    #[tokio::test]
    async fn test_valid_submit_creates_and_returns_to_list() {
        let mut mock = connected_mock();
        mock.expect_create()
            .withf(|kind, values| {
                *kind == EntityKind::Inventory && values.text("ingredient_name") == "flour"
            })
            .returning(|_, _| Ok("new-id".into()));
        let mut app = app_with(mock).await;
        app.state.set_entity(EntityKind::Inventory);
        app.reload_current_list().await;

        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        for c in "flour".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        // quantity
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Backspace)).await.unwrap();
        app.handle_key(key(KeyCode::Char('5'))).await.unwrap();
        // unit
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Char('k'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('g'))).await.unwrap();

        // restaurant_id via picker
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap(); // open picker
        let outcome = FetchOutcome {
            generation: app.fetch_seq,
            result: Ok(vec![RelationOption::new("r1", "Harborside")]),
        };
        app.apply_fetch_outcome(outcome);
        app.handle_key(key(KeyCode::Enter)).await.unwrap(); // select

        app.handle_key(ctrl('s')).await.unwrap();
        assert!(app.state.form.is_none());
        assert_eq!(app.state.current_view, View::List);
        assert_eq!(app.state.status_message.as_deref(), Some("Inventory created"));
    }

    #[tokio::test]
    async fn test_fetch_outcome_after_form_close_is_discarded() {
        let mut app = app_with(connected_mock()).await;
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        // owner_id picker
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        let generation = app.fetch_seq;

        // Leave the form before the fetch resolves
        app.handle_key(key(KeyCode::Esc)).await.unwrap(); // close picker
        app.handle_key(key(KeyCode::Esc)).await.unwrap(); // close form
        assert!(app.state.form.is_none());

        app.apply_fetch_outcome(FetchOutcome {
            generation,
            result: Ok(vec![RelationOption::new("u1", "ana")]),
        });
        assert!(app.state.form.is_none());
    }

    #[tokio::test]
    async fn test_stale_fetch_generation_is_ignored() {
        let mut app = app_with(connected_mock()).await;
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap(); // open picker, gen 1
        let first = app.fetch_seq;
        app.handle_key(key(KeyCode::Char('r'))).await.unwrap(); // refresh, gen 2
        let second = app.fetch_seq;
        assert_ne!(first, second);

        app.apply_fetch_outcome(FetchOutcome {
            generation: first,
            result: Ok(vec![RelationOption::new("old", "old")]),
        });
        let picker = app.state.form.as_ref().unwrap().picker.as_ref().unwrap();
        assert!(matches!(
            picker.load_state(),
            crate::state::forms::LoadState::Loading
        ));
        assert!(picker.options().is_empty());

        app.apply_fetch_outcome(FetchOutcome {
            generation: second,
            result: Ok(vec![RelationOption::new("u1", "ana")]),
        });
        let picker = app.state.form.as_ref().unwrap().picker.as_ref().unwrap();
        assert_eq!(picker.options().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_form_usable() {
        let mut app = app_with(connected_mock()).await;
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.apply_fetch_outcome(FetchOutcome {
            generation: app.fetch_seq,
            result: Err("backend unavailable".into()),
        });

        let picker = app.state.form.as_ref().unwrap().picker.as_ref().unwrap();
        assert_eq!(
            picker.load_state(),
            &crate::state::forms::LoadState::Failed("backend unavailable".into())
        );

        // Selecting is refused, the overlay stays, and closing it leaves
        // the rest of the form editable
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.state.form.as_ref().unwrap().picker.is_some());
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        let session = app.state.form.as_mut().unwrap();
        assert!(session.picker.is_none());
        session.prev_field(); // back to name
        session.handle_char('x');
        assert_eq!(session.controller.values().text("name"), "x");
    }

    #[tokio::test]
    async fn test_delete_flow_with_confirmation() {
        let mut mock = connected_mock();
        mock.expect_delete()
            .withf(|kind, id| *kind == EntityKind::Restaurant && id == "r1")
            .returning(|_, _| Ok(()));
        let mut app = app_with(mock).await;

        app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
        assert!(app.state.pending_delete.is_some());

        // Default highlight is Cancel; Enter must not delete
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.state.pending_delete.is_none());

        app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("Restaurant deleted")
        );
    }

    #[tokio::test]
    async fn test_error_dialog_swallows_keys_until_dismissed() {
        let mut app = app_with(connected_mock()).await;
        app.push_error("boom");
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        assert!(app.state.form.is_none(), "input must be swallowed");
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.state.current_error().is_none());
    }

    #[tokio::test]
    async fn test_entity_cycling_reloads() {
        let mut app = app_with(connected_mock()).await;
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        assert_ne!(app.state.current_entity, EntityKind::Restaurant);
        app.handle_key(key(KeyCode::Left)).await.unwrap();
        assert_eq!(app.state.current_entity, EntityKind::Restaurant);
    }

    #[tokio::test]
    async fn test_add_row_via_enter_on_add_button() {
        let mut app = app_with(connected_mock()).await;
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        // name, owner_id, then the employee add-row button
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        let session = app.state.form.as_ref().unwrap();
        assert_eq!(session.controller.values().rows("employee").len(), 1);

        // Ctrl+D removes the row under the cursor
        app.handle_key(ctrl('d')).await.unwrap();
        let session = app.state.form.as_ref().unwrap();
        assert!(session.controller.values().rows("employee").is_empty());
    }
}

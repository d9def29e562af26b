//! UI module for rendering the TUI

pub mod components;
mod entity_list;
mod forms;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (sidebar_area, main_area, status_area) = layout::create_layout(area);

    layout::draw_sidebar(frame, sidebar_area, app);

    match app.state.current_view {
        View::List => entity_list::draw(frame, main_area, app),
        View::Form => forms::draw_form(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Overlays, innermost last
    if let Some(pending) = app.state.pending_delete.as_ref() {
        components::render_confirm_dialog(frame, pending);
    }
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }
}

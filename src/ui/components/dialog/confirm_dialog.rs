//! Confirmation dialog component for destructive actions

use super::base::{render_dialog, DialogConfig};
use crate::state::PendingDelete;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render a confirmation dialog for a pending delete
pub fn render_confirm_dialog(frame: &mut Frame, pending: &PendingDelete) {
    let message = format!(
        "Delete {} \"{}\"?",
        pending.kind.label().to_lowercase(),
        pending.display
    );

    let mut body = vec![Line::from("")];
    for (is_delete, label) in [(false, "Cancel"), (true, "Delete")] {
        let is_selected = pending.selected_option == is_delete;
        let prefix = if is_selected { "▸ " } else { "  " };
        let color = if is_delete { Color::Red } else { Color::White };
        let style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        body.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    let hint = vec![
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Confirm Delete",
            color: Color::Red,
            message: &message,
            body,
            hint: Some(hint),
            max_width: 50,
        },
    );
}

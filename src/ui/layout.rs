//! Main layout: entity sidebar, content area, status bar

use crate::app::App;
use crate::entities::EntityKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 20;

/// Split the screen into sidebar, main content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(vertical[0]);

    (horizontal[0], horizontal[1], vertical[1])
}

pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Entities ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for (index, kind) in EntityKind::ALL.iter().enumerate() {
        let selected = *kind == app.state.current_entity;
        let count = app
            .state
            .records
            .get(kind)
            .map(Vec::len)
            .unwrap_or_default();
        let marker = if selected { "▸ " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{} ", index + 1), style),
            Span::styled(kind.plural().to_string(), style),
            Span::styled(format!(" ({count})"), Style::default().fg(Color::DarkGray)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let connection = if app.state.backend_connected {
        Span::styled("● connected", Style::default().fg(Color::Green))
    } else {
        Span::styled("● offline", Style::default().fg(Color::Red))
    };

    let mut spans = vec![connection, Span::raw("  ")];
    if let Some(message) = app.state.status_message.as_deref() {
        spans.push(Span::styled(message, Style::default().fg(Color::Yellow)));
    } else {
        spans.extend([
            Span::styled("n", Style::default().fg(Color::Cyan)),
            Span::raw(": new  "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(": edit  "),
            Span::styled("d", Style::default().fg(Color::Cyan)),
            Span::raw(": delete  "),
            Span::styled("y", Style::default().fg(Color::Cyan)),
            Span::raw(": copy id  "),
            Span::styled("←→", Style::default().fg(Color::Cyan)),
            Span::raw(": entity  "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(": quit"),
        ]);
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(bar, area);
}

//! Entity list screen
//!
//! One table renderer serves all eight entities; the column set comes from
//! the entity registry and cell text from the field values' display form.

use crate::app::App;
use crate::state::forms::FieldValue;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let kind = app.state.current_entity;
    let columns = kind.list_columns();
    let records = app.state.current_records();
    let spec = kind.form_spec();

    if records.is_empty() {
        let empty = Paragraph::new(format!(
            "No {} yet — press n to create one",
            kind.plural().to_lowercase()
        ))
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .title(format!(" {} (0) ", kind.plural()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(columns.iter().map(|column| {
        let label = spec.field(column).map(|f| f.label).unwrap_or(*column);
        Cell::from(label).style(Style::default().add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().fg(Color::Cyan))
    .bottom_margin(1);

    let rows = records.iter().enumerate().map(|(index, record)| {
        let cells = columns.iter().map(|column| {
            let text = record
                .values
                .get(column)
                .map(FieldValue::display_value)
                .unwrap_or_default();
            Cell::from(text)
        });
        let style = if index == app.state.selected_index {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(cells).style(style)
    });

    let widths = vec![Constraint::Ratio(1, columns.len() as u32); columns.len()];
    let title = format!(" {} ({}) ", kind.plural(), records.len());
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(table, area);
}

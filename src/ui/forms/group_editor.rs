//! Repeatable group section rendering
//!
//! Draws a group's heading, its rows (fields side by side, each delegated
//! to the render callback), and the trailing add-row button as separately
//! placeable pieces, so the form page can scroll through tall groups. The
//! editor knows nothing about widget kinds; it only hands each (row,
//! field) pair to the callback with its value, label and error.

use super::field_renderer::{FieldContext, RenderRowField, FIELD_HEIGHT};
use crate::state::forms::{FieldErrors, RowDraft, RowGroup};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Height of one rendered group: heading + rows + add button
pub fn group_height(row_count: usize) -> u16 {
    1 + row_count as u16 * FIELD_HEIGHT + FIELD_HEIGHT
}

pub fn draw_heading(frame: &mut Frame, area: Rect, group: &RowGroup, row_count: usize) {
    let heading = Paragraph::new(Line::from(Span::styled(
        format!("{} ({row_count})", group.title),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(heading, area);
}

/// Draw one row: its fields split horizontally in schema order
#[allow(clippy::too_many_arguments)]
pub fn draw_row(
    frame: &mut Frame,
    area: Rect,
    group: &RowGroup,
    row: &RowDraft,
    row_index: usize,
    errors: &FieldErrors,
    active_field: Option<usize>,
    editing: Option<&str>,
    render_row_field: &RenderRowField,
) {
    let per_field = vec![Constraint::Ratio(1, group.fields.len() as u32); group.fields.len()];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(per_field)
        .split(area);

    for (field_index, field) in group.fields.iter().enumerate() {
        let active = active_field == Some(field_index);
        let value = row.get(&field.name).cloned().unwrap_or_default();
        let ctx = FieldContext {
            field_name: &field.name,
            name: format!("{}.{}.{}", group.name, row_index, field.name),
            value: &value,
            error: errors.row(&group.name, row_index, &field.name),
            label: &field.label,
            active,
            editing: if active { editing } else { None },
        };
        render_row_field(frame, cells[field_index], ctx);
    }
}

pub fn draw_add_button(frame: &mut Frame, area: Rect, group: &RowGroup, active: bool) {
    let label = format!("+ Add {}", group.title);
    let button_width = (label.len() as u16 + 4).min(area.width);
    let button_area = Rect {
        width: button_width,
        height: BUTTON_HEIGHT.min(area.height),
        ..area
    };
    render_button(frame, button_area, &label, active, true);
}

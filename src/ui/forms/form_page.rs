//! Generic create/edit form page
//!
//! One renderer drives every entity's form: scalar and relation fields
//! stacked first, then each repeatable group, then the submit/cancel row.
//! The page lays everything out in a virtual column and scrolls it so the
//! focused stop stays visible, which is what lets the restaurant form
//! carry six groups on one screen.

use super::field_renderer::{draw_field, FieldContext, FIELD_HEIGHT};
use super::group_editor;
use super::picker::draw_picker;
use crate::app::App;
use crate::platform;
use crate::state::FocusStop;
use crate::ui::components::render_button;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// One placeable piece of the virtual form column
#[derive(Debug, Clone, Copy)]
enum Item {
    Scalar(usize),
    GroupHeading(usize),
    GroupRow { group: usize, row: usize },
    GroupAdd(usize),
    Buttons,
}

pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.state.form.as_ref() else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", session.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(FIELD_HEIGHT), Constraint::Length(1)])
        .split(inner);
    let content = chunks[0];

    // Virtual column layout
    let mut items: Vec<(Item, u16, u16)> = Vec::new(); // (item, y, height)
    let mut y = 0u16;
    for index in 0..session.spec.fields.len() {
        items.push((Item::Scalar(index), y, FIELD_HEIGHT));
        y += FIELD_HEIGHT;
    }
    for (group_index, group) in session.spec.groups.iter().enumerate() {
        let rows = session.controller.values().rows(group.name).len();
        items.push((Item::GroupHeading(group_index), y, 1));
        y += 1;
        for row in 0..rows {
            items.push((
                Item::GroupRow {
                    group: group_index,
                    row,
                },
                y,
                FIELD_HEIGHT,
            ));
            y += FIELD_HEIGHT;
        }
        items.push((Item::GroupAdd(group_index), y, FIELD_HEIGHT));
        y += FIELD_HEIGHT;
    }
    items.push((Item::Buttons, y, FIELD_HEIGHT));
    y += FIELD_HEIGHT;
    let total = y;

    let offset = scroll_offset(
        active_y(session.active_stop(), &items),
        total,
        content.height,
    );

    for (item, item_y, height) in &items {
        let Some(screen_y) = item_y.checked_sub(offset) else {
            continue;
        };
        if screen_y + height > content.height {
            continue;
        }
        let item_area = Rect {
            x: content.x,
            y: content.y + screen_y,
            width: content.width,
            height: *height,
        };
        draw_item(frame, item_area, app, *item);
    }

    draw_help(frame, chunks[1]);

    if let Some(picker) = session.picker.as_ref() {
        draw_picker(frame, picker, &|option| {
            Line::from(format!("{} ({})", option.label, option.id))
        });
    }
}

/// Virtual y position of the focused stop
fn active_y(stop: FocusStop, items: &[(Item, u16, u16)]) -> u16 {
    items
        .iter()
        .find_map(|(item, y, _)| {
            let hit = match (item, stop) {
                (Item::Scalar(i), FocusStop::Scalar(j)) => *i == j,
                (
                    Item::GroupRow { group, row },
                    FocusStop::RowField {
                        group: g, row: r, ..
                    },
                ) => *group == g && *row == r,
                (Item::GroupAdd(i), FocusStop::AddRow(j)) => *i == j,
                (Item::Buttons, FocusStop::Buttons) => true,
                _ => false,
            };
            hit.then_some(*y)
        })
        .unwrap_or(0)
}

/// Keep the active item roughly centered once the column overflows
fn scroll_offset(active_y: u16, total: u16, viewport: u16) -> u16 {
    if total <= viewport {
        return 0;
    }
    let max_offset = total - viewport;
    active_y
        .saturating_sub(viewport.saturating_sub(FIELD_HEIGHT) / 2)
        .min(max_offset)
}

fn draw_item(frame: &mut Frame, area: Rect, app: &App, item: Item) {
    let Some(session) = app.state.form.as_ref() else {
        return;
    };
    let stop = session.active_stop();
    let values = session.controller.values();
    let errors = session.controller.errors();

    match item {
        Item::Scalar(index) => {
            let Some(field) = session.spec.fields.get(index) else {
                return;
            };
            let active = stop == FocusStop::Scalar(index);
            let value = values.get(field.name).cloned().unwrap_or_default();
            let ctx = FieldContext {
                field_name: field.name,
                name: field.name.to_string(),
                value: &value,
                error: errors.scalar(field.name),
                label: field.label,
                active,
                editing: if active { session.edit_buffer() } else { None },
            };
            draw_field(frame, area, &ctx);
        }
        Item::GroupHeading(index) => {
            if let Some(group) = session.row_group(index) {
                let rows = values.rows(&group.name).len();
                group_editor::draw_heading(frame, area, &group, rows);
            }
        }
        Item::GroupRow { group, row } => {
            let Some(row_group) = session.row_group(group) else {
                return;
            };
            let Some(draft) = values.rows(&row_group.name).get(row) else {
                return;
            };
            let active_field = match stop {
                FocusStop::RowField {
                    group: g,
                    row: r,
                    field,
                } if g == group && r == row => Some(field),
                _ => None,
            };
            group_editor::draw_row(
                frame,
                area,
                &row_group,
                draft,
                row,
                errors,
                active_field,
                session.edit_buffer(),
                &|frame, cell, ctx| draw_field(frame, cell, &ctx),
            );
        }
        Item::GroupAdd(index) => {
            if let Some(group) = session.row_group(index) {
                let active = stop == FocusStop::AddRow(index);
                group_editor::draw_add_button(frame, area, &group, active);
            }
        }
        Item::Buttons => {
            draw_buttons(frame, area, app);
        }
    }
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.state.form.as_ref() else {
        return;
    };
    let focused = session.is_buttons_row_active();
    let submit_enabled =
        session.controller.is_valid() && !session.controller.is_submitting();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(area);

    render_button(
        frame,
        chunks[0],
        "Submit",
        focused && session.selected_button == 0,
        submit_enabled,
    );
    render_button(
        frame,
        chunks[1],
        "Cancel",
        focused && session.selected_button == 1,
        true,
    );
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next field  "),
        Span::styled(
            platform::SAVE_SHORTCUT,
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(": save  "),
        Span::styled(
            platform::REMOVE_ROW_SHORTCUT,
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(": remove row  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": cancel"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

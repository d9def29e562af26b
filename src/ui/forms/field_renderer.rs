//! Field rendering utilities for forms
//!
//! Every concrete widget is drawn through `draw_field`, and the repeatable
//! group editor reaches widgets only through a caller-supplied render
//! callback over `FieldContext`. That keeps the group editor free of any
//! switch over field types: plugging in a new widget kind means changing
//! the callback, not the editor.

use crate::state::forms::FieldValue;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything a render callback gets to know about one (row, field) pair
pub struct FieldContext<'a> {
    /// Field name within its record or row ("user_id")
    pub field_name: &'a str,
    /// Fully qualified name for display ("employee.0.user_id")
    pub name: String,
    pub value: &'a FieldValue,
    pub error: Option<&'a str>,
    pub label: &'a str,
    pub active: bool,
    /// In-progress typed text for the active field, shown instead of the
    /// committed value
    pub editing: Option<&'a str>,
}

/// Render callback signature used by the repeatable group editor
pub type RenderRowField = dyn Fn(&mut Frame, Rect, FieldContext);

/// Rows a single bordered field occupies
pub const FIELD_HEIGHT: u16 = 3;

/// Draw one bordered field box with label, value, cursor and error state
pub fn draw_field(frame: &mut Frame, area: Rect, ctx: &FieldContext) {
    let accent = if ctx.active {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let border_style = if ctx.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(accent)
    };

    let display_value = match ctx.editing {
        Some(buffer) => buffer.to_string(),
        None => ctx.value.display_value(),
    };
    let display_str = if display_value.is_empty() && !ctx.active {
        placeholder(ctx)
    } else {
        display_value
    };

    let cursor = if ctx.active { "▌" } else { "" };
    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_str, Style::default().fg(accent)),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    // The active field also shows its bound value path, which is what
    // distinguishes row fields of the same sub-entity from each other
    let title = match (ctx.error, ctx.active) {
        (Some(error), _) => format!(" {} — {} ", ctx.label, error),
        (None, true) => format!(" {} · {} ", ctx.label, ctx.name),
        (None, false) => format!(" {} ", ctx.label),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.block(block), area);
}

fn placeholder(ctx: &FieldContext) -> String {
    match ctx.value {
        FieldValue::Relation(_) => format!("(no {} selected)", ctx.field_name),
        _ => "(empty)".to_string(),
    }
}

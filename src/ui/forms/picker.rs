//! Relation picker overlay
//!
//! Centered over the form while a relation field is being chosen. The
//! candidate list is rendered through a caller-supplied option renderer so
//! the overlay itself never inspects option contents.

use crate::state::forms::{LoadState, RelationOption, RelationPicker};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// How many candidate rows the overlay shows at once
const VISIBLE_OPTIONS: usize = 8;

pub fn draw_picker(
    frame: &mut Frame,
    picker: &RelationPicker,
    render_option: &dyn Fn(&RelationOption) -> Line<'static>,
) {
    let area = frame.area();
    let width = 44u16.min(area.width);
    let height = (VISIBLE_OPTIONS as u16 + 5).min(area.height);
    let overlay = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, overlay);

    let mut content: Vec<Line> = Vec::new();
    match picker.load_state() {
        LoadState::Idle | LoadState::Loading => {
            content.push(Line::from(Span::styled(
                "Loading options…",
                Style::default().fg(Color::DarkGray),
            )));
        }
        LoadState::Failed(message) => {
            content.push(Line::from(Span::styled(
                format!("Load failed: {message}"),
                Style::default().fg(Color::Red),
            )));
            content.push(Line::from(Span::styled(
                "r: retry",
                Style::default().fg(Color::DarkGray),
            )));
        }
        LoadState::Loaded if picker.options().is_empty() => {
            content.push(Line::from(Span::styled(
                "No candidates",
                Style::default().fg(Color::DarkGray),
            )));
        }
        LoadState::Loaded => {
            let (first, last) = visible_window(picker.highlighted, picker.options().len());
            for (index, option) in picker.options().iter().enumerate() {
                if index < first || index > last {
                    continue;
                }
                let rendered = render_option(option);
                let mut spans = Vec::with_capacity(rendered.spans.len() + 1);
                if index == picker.highlighted {
                    let highlight = Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD);
                    spans.push(Span::styled("▸ ", highlight));
                    spans.extend(
                        rendered
                            .spans
                            .into_iter()
                            .map(|span| Span::styled(span.content, highlight)),
                    );
                } else {
                    spans.push(Span::raw("  "));
                    spans.extend(rendered.spans);
                }
                content.push(Line::from(spans));
            }
        }
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" move  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("r", Style::default().fg(Color::Cyan)),
        Span::styled(" refresh  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ]));

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .title(format!(" Select {} ", picker.label))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));
    frame.render_widget(dialog, overlay);
}

/// Inclusive index window keeping the highlight visible
fn visible_window(highlighted: usize, len: usize) -> (usize, usize) {
    if len <= VISIBLE_OPTIONS {
        return (0, len.saturating_sub(1));
    }
    let first = highlighted.saturating_sub(VISIBLE_OPTIONS - 1);
    (first, first + VISIBLE_OPTIONS - 1)
}

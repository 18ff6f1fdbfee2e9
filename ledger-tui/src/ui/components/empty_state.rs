//! Shared "no data" and error placeholders for tables.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Render a centered message with an optional hint below it.
pub fn render_empty_state(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    hint: Option<&str>,
) {
    render_message(f, area, title, message, theme::loading_style(), hint);
}

/// Same layout as the empty state, with the message in the error style
pub fn render_error_state(f: &mut Frame, area: Rect, title: &str, message: &str) {
    render_message(f, area, title, message, theme::error_style(), Some("Press r to retry"));
}

fn render_message(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    style: Style,
    hint: Option<&str>,
) {
    let mut lines = vec![Line::from(""), Line::from(Span::styled(message, style))];

    if let Some(hint_text) = hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            hint_text,
            theme::help_text_style(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(paragraph, area);
}

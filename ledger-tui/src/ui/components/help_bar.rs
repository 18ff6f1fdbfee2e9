//! Bottom row of key hints.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Render `key: action` pairs separated by bars, keys highlighted
pub fn render_help_bar(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme::help_text_style()));
        }
        spans.push(Span::styled(*key, theme::header_style()));
        spans.push(Span::styled(format!(": {}", action), theme::help_text_style()));
    }

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::bordered());

    f.render_widget(help, area);
}

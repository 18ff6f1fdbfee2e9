use ratatui::{layout::Alignment, prelude::Rect, widgets::Paragraph, Frame};

use crate::state::StatusMessage;
use crate::ui::theme;

/// Last save/load outcome, right-aligned in the title row
pub fn render_status(f: &mut Frame, area: Rect, status: Option<&StatusMessage>) {
    let Some(status) = status else {
        return;
    };

    let style = if status.is_error {
        theme::error_style()
    } else {
        theme::loading_style()
    };

    f.render_widget(
        Paragraph::new(status.text.as_str())
            .style(style)
            .alignment(Alignment::Right),
        area,
    );
}

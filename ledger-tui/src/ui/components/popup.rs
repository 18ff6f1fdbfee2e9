//! Modal frame drawn over the current screen.

use ratatui::prelude::Rect;
use ratatui::{
    style::Style,
    text::Line,
    widgets::{Block, Clear},
    Frame,
};

use crate::ui::layouts;

/// Blank out a centered `(width %, height %)` area, draw a bordered block
/// titled `title` and hand back the area inside the border.
pub fn render_popup_frame(
    f: &mut Frame,
    parent_area: Rect,
    size: (u16, u16),
    title: &str,
    border_style: Style,
) -> Rect {
    let (width, height) = size;
    let area = layouts::centered_popup(width, height, parent_area);

    let block = Block::bordered()
        .title(Line::from(title).centered())
        .border_style(border_style);
    let inner = block.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(block, area);
    inner
}

//! Screen and popup geometry shared by every screen.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

use super::theme::{HELP_BAR_HEIGHT, SCREEN_MARGIN, TITLE_HEIGHT};

/// Title row, content, help bar. Returns `(title, content, help)`.
pub fn screen_layout(area: Rect) -> (Rect, Rect, Rect) {
    let [title, content, help] = Layout::vertical([
        Constraint::Length(TITLE_HEIGHT),
        Constraint::Min(10),
        Constraint::Length(HELP_BAR_HEIGHT),
    ])
    .margin(SCREEN_MARGIN)
    .areas(area);

    (title, content, help)
}

/// Split the title row into the screen name and a right-hand status slot
pub fn title_with_status(area: Rect) -> (Rect, Rect) {
    let [name, status] =
        Layout::horizontal([Constraint::Min(10), Constraint::Percentage(50)]).areas(area);
    (name, status)
}

/// Rectangle of `percent_x` by `percent_y` centered in `area`
pub fn centered_popup(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

/// Popup sizes as (width %, height %)
pub mod popup_sizes {
    /// Short forms
    pub const SMALL: (u16, u16) = (50, 30);

    /// Category lists
    pub const MEDIUM: (u16, u16) = (60, 60);

    /// Help
    pub const LARGE: (u16, u16) = (80, 80);
}

//! Centralized theme constants and style functions for consistent UI styling.
//!
//! Blotter rows carry abstract color tokens; this module maps them to
//! terminal colors.

use ratatui::style::{Color, Modifier, Style};

use crate::blotter::{ColorToken, IconToken, IndicatorColor};

// =============================================================================
// Colors
// =============================================================================

/// Color for positive amounts (income)
pub const COLOR_POSITIVE: Color = Color::Green;

/// Color for negative amounts (expenses)
pub const COLOR_NEGATIVE: Color = Color::Red;

/// Color for zero amounts and muted text
pub const COLOR_ZERO: Color = Color::DarkGray;

/// Color for transfer amounts
pub const COLOR_TRANSFER: Color = Color::Cyan;

/// Color for future-dated transactions
pub const COLOR_FUTURE: Color = Color::Blue;

/// Background color for selected/highlighted rows
pub const COLOR_SELECTION_BG: Color = Color::DarkGray;

/// Color for table headers
pub const COLOR_HEADER: Color = Color::Yellow;

/// Color for help text and secondary information
pub const COLOR_HELP_TEXT: Color = Color::Gray;

/// Color for screen titles and accent text
pub const COLOR_TITLE: Color = Color::Cyan;

/// Color for loading/status messages
pub const COLOR_LOADING: Color = Color::Yellow;

/// Border color for informational popups
pub const COLOR_BORDER_INFO: Color = Color::Blue;

/// Border color for accent/highlighted elements
pub const COLOR_BORDER_ACCENT: Color = Color::Cyan;

/// Background for form fields when focused
pub const COLOR_FORM_FIELD_BG: Color = Color::DarkGray;

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 2;

/// Height of the title/header area
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

/// Standard column spacing for tables
pub const TABLE_COLUMN_SPACING: u16 = 2;

// =============================================================================
// Style Functions
// =============================================================================

/// Style for selected/highlighted rows in tables and lists
pub fn selection_style() -> Style {
    Style::default()
        .bg(COLOR_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for table headers
pub fn header_style() -> Style {
    Style::default()
        .fg(COLOR_HEADER)
        .add_modifier(Modifier::BOLD)
}

/// Style for help bar text
pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

/// Style for screen titles
pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD)
}

/// Style for loading/status messages
pub fn loading_style() -> Style {
    Style::default().fg(COLOR_LOADING)
}

pub fn error_style() -> Style {
    Style::default()
        .fg(COLOR_NEGATIVE)
        .add_modifier(Modifier::BOLD)
}

/// Style for form fields when focused
pub fn form_field_focused_style() -> Style {
    Style::default()
        .bg(COLOR_FORM_FIELD_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for form fields when not focused
pub fn form_field_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for info borders
pub fn info_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_INFO)
        .add_modifier(Modifier::BOLD)
}

/// Style for accent borders
pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_BORDER_ACCENT)
}

// =============================================================================
// Blotter tokens
// =============================================================================

/// Terminal color for a row color token. `Default` follows the title line.
pub fn color_for(token: ColorToken) -> Color {
    match token {
        ColorToken::Default | ColorToken::Regular => Color::White,
        ColorToken::Transfer => COLOR_TRANSFER,
        ColorToken::Positive => COLOR_POSITIVE,
        ColorToken::Negative => COLOR_NEGATIVE,
        ColorToken::Future => COLOR_FUTURE,
    }
}

pub fn indicator_color(indicator: IndicatorColor) -> Color {
    match indicator {
        IndicatorColor::Template => Color::Magenta,
        IndicatorColor::Restored => Color::LightMagenta,
        IndicatorColor::Pending => Color::Yellow,
        IndicatorColor::Unreconciled => COLOR_ZERO,
        IndicatorColor::Cleared => COLOR_POSITIVE,
        IndicatorColor::Reconciled => Color::LightBlue,
    }
}

pub fn icon_glyph(icon: IconToken) -> &'static str {
    match icon {
        IconToken::Income => "▲",
        IconToken::Expense => "▼",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_token_matches_regular() {
        assert_eq!(color_for(ColorToken::Default), color_for(ColorToken::Regular));
        assert_eq!(color_for(ColorToken::Negative), COLOR_NEGATIVE);
    }

    #[test]
    fn test_icons_differ() {
        assert_ne!(icon_glyph(IconToken::Income), icon_glyph(IconToken::Expense));
    }
}

use ratatui::{
    prelude::*,
    widgets::{Cell, Row, Table},
    Frame,
};

use crate::state::{PickerMode, PickerState};
use crate::ui::{layouts, theme};

/// Category list popup. Sentinel rows (split, no category) are dimmed.
pub fn render_category_picker(f: &mut Frame, picker: &PickerState, selected_id: i64) {
    let title = match picker.mode {
        PickerMode::Tree => " Select category (Enter: pick, Esc: cancel) ",
        PickerMode::QuickList => " Categories (Enter: pick, Esc: cancel) ",
    };

    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::MEDIUM,
        title,
        theme::accent_border_style(),
    );

    let rows: Vec<Row> = picker
        .items
        .iter()
        .map(|item| {
            let marker = if item.id() == selected_id { "●" } else { " " };
            let style = if item.is_sentinel() {
                Style::default().fg(theme::COLOR_HELP_TEXT).italic()
            } else {
                theme::form_field_style()
            };
            Row::new(vec![Cell::from(marker), Cell::from(item.label())]).style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(1), Constraint::Min(10)])
        .column_spacing(1)
        .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, inner, &mut picker.table_state.borrow_mut());
}

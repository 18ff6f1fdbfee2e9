use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::CategoryFormState;
use crate::ui::{layouts, theme};

pub fn render_category_form(f: &mut Frame, form: &CategoryFormState) {
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::SMALL,
        " New category ",
        theme::info_border_style(),
    );

    let parent = form
        .parent()
        .map(|item| item.title().to_string())
        .unwrap_or_else(|| "(top level)".to_string());

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{:8}", "Title"), theme::header_style()),
            Span::styled(format!("{}█", form.title), theme::form_field_focused_style()),
        ]),
        Line::from(vec![
            Span::styled(format!("{:8}", "Parent"), theme::header_style()),
            Span::styled(parent, theme::form_field_style()),
        ]),
        Line::from(""),
    ];

    if let Some(ref error) = form.error {
        lines.push(Line::from(Span::styled(error.as_str(), theme::error_style())));
    }

    lines.push(Line::from(Span::styled(
        "Enter: create | Tab/Shift+Tab: parent | Esc: cancel",
        theme::help_text_style(),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}

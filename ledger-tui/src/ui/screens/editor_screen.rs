use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{EditorPopup, EditorState, StatusMessage};
use crate::ui::{
    components::{category_form, category_picker, help_bar, status_line},
    layouts, theme,
};

pub fn render(f: &mut Frame, editor: &EditorState, status: Option<&StatusMessage>) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let (title_text_area, status_area) = layouts::title_with_status(title_area);
    f.render_widget(
        Paragraph::new(format!("Transaction {}", editor.transaction_id()))
            .style(theme::title_style()),
        title_text_area,
    );
    status_line::render_status(f, status_area, status);

    render_content(f, content_area, editor);
    help_bar::render_help_bar(f, help_area, help_hints(editor));

    match editor.popup {
        Some(EditorPopup::Picker(ref picker)) => {
            category_picker::render_category_picker(f, picker, editor.selector.selected_category_id());
        }
        Some(EditorPopup::CategoryForm(ref form)) => {
            category_form::render_category_form(f, form);
        }
        None => {}
    }
}

fn render_content(f: &mut Frame, area: Rect, editor: &EditorState) {
    let record = &editor.record;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{:12}", "Account"), theme::header_style()),
            Span::raw(record.from_account_title.clone()),
        ]),
        Line::from(vec![
            Span::styled(format!("{:12}", "Payee"), theme::header_style()),
            Span::raw(record.payee.clone().unwrap_or_default()),
        ]),
        Line::from(""),
        category_line(editor),
        Line::from(""),
    ];

    if let Some(panel) = editor.selector.attributes_panel() {
        let focused = panel.focused();
        for (index, view) in panel.rows().iter().enumerate() {
            let style = if focused == Some(index) {
                theme::form_field_focused_style()
            } else {
                theme::form_field_style()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:12}", view.attribute().title), theme::header_style()),
                Span::styled(view.display_value(), style),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Category"));
    f.render_widget(paragraph, area);
}

fn category_line(editor: &EditorState) -> Line<'static> {
    let node = editor.selector.node();
    let mut spans = vec![
        Span::styled(format!("{:12}", "Category"), theme::header_style()),
        Span::styled(editor.selector.label().to_string(), theme::form_field_focused_style()),
    ];
    if node.offers_add() {
        spans.push(Span::styled("  [a] new", theme::help_text_style()));
    }
    if node.offers_split() {
        spans.push(Span::styled("  [s] split", theme::help_text_style()));
    }
    Line::from(spans)
}

fn help_hints(editor: &EditorState) -> &'static [(&'static str, &'static str)] {
    if editor.attribute_focused() {
        &[
            ("Tab/Shift+Tab", "field"),
            ("←/→", "change"),
            ("Enter", "save"),
            ("Esc", "leave field"),
        ]
    } else {
        &[
            ("c", "category"),
            ("Tab", "attributes"),
            ("Ctrl+S", "save"),
            ("Esc", "discard"),
            ("?", "help"),
        ]
    }
}

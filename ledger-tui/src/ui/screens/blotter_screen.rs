use ratatui::{
    prelude::*,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::blotter::{self, BlotterRow, RenderContext};
use crate::state::{BlotterState, LoadingState, StatusMessage};
use crate::ui::{
    components::{empty_state, help_bar, status_line},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &BlotterState, ctx: &RenderContext, status: Option<&StatusMessage>) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let (title_text_area, status_area) = layouts::title_with_status(title_area);
    f.render_widget(
        Paragraph::new(format!("Blotter ({} transactions)", state.records.len()))
            .style(theme::title_style()),
        title_text_area,
    );
    status_line::render_status(f, status_area, status);

    render_content(f, content_area, state, ctx);
    help_bar::render_help_bar(
        f,
        help_area,
        &[
            ("j/k", "move"),
            ("Enter", "edit category"),
            ("r", "reload"),
            ("gl", "logs"),
            ("?", "help"),
            ("q", "quit"),
        ],
    );
}

fn render_content(f: &mut Frame, area: Rect, state: &BlotterState, ctx: &RenderContext) {
    if let LoadingState::Error(ref error) = state.loading {
        if state.records.is_empty() {
            empty_state::render_error_state(f, area, "Blotter", error);
            return;
        }
    }

    if state.records.is_empty() {
        empty_state::render_empty_state(
            f,
            area,
            "Blotter",
            "No transactions found",
            Some("Add transactions to the data file and press r"),
        );
        return;
    }

    let rows: Vec<Row> = state
        .records
        .iter()
        .map(|record| build_row(&blotter::render_row(record, &state.currencies, ctx)))
        .collect();

    let mut widths = vec![
        Constraint::Length(1),
        Constraint::Min(20),
        Constraint::Length(1),
        Constraint::Length(24),
    ];
    if ctx.show_running_balance {
        widths.push(Constraint::Length(16));
    }

    let table = Table::new(rows, widths)
        .column_spacing(theme::TABLE_COLUMN_SPACING)
        .block(Block::default().borders(Borders::ALL).title("Transactions"))
        .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

/// Two-line row: title over payee/category on the left, amount over date
/// on the right
fn build_row(row: &BlotterRow) -> Row<'static> {
    let title_color = theme::color_for(blotter::ColorToken::Regular);
    let center_color = match row.center_color {
        blotter::ColorToken::Default => title_color,
        token => theme::color_for(token),
    };

    let indicator = Cell::from(Text::from(vec![Line::from("▌"), Line::from("▌")]))
        .style(Style::default().fg(theme::indicator_color(row.indicator)));

    let main = Cell::from(Text::from(vec![
        Line::from(Span::styled(row.title.clone(), Style::default().fg(title_color).bold())),
        Line::from(Span::styled(row.center.clone(), Style::default().fg(center_color))),
    ]));

    let icon = match (row.icon, row.icon_color) {
        (Some(icon), Some(color)) => Cell::from(theme::icon_glyph(icon))
            .style(Style::default().fg(theme::color_for(color))),
        _ => Cell::from(""),
    };

    let amount_color = row
        .icon_color
        .map(theme::color_for)
        .unwrap_or(center_color);
    let right = Cell::from(Text::from(vec![
        Line::from(Span::styled(row.amount.clone(), Style::default().fg(amount_color)))
            .right_aligned(),
        Line::from(Span::styled(
            row.date.clone(),
            Style::default().fg(theme::color_for(row.date_color)),
        ))
        .right_aligned(),
    ]));

    let mut cells = vec![indicator, main, icon, right];
    if let Some(ref balance) = row.balance {
        cells.push(Cell::from(
            Text::from(vec![
                Line::from(""),
                Line::from(Span::styled(balance.clone(), theme::help_text_style())),
            ])
            .right_aligned(),
        ));
    }

    Row::new(cells).height(2)
}

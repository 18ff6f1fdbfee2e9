use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use tracing::Level;

use crate::log_buffer::{LogBuffer, LogEntry};
use crate::state::LogsState;
use crate::ui::{
    components::{empty_state, help_bar},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &LogsState, log_buffer: &LogBuffer) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    f.render_widget(
        Paragraph::new(format!("Session log ({} entries)", state.total_entries))
            .style(theme::title_style()),
        title_area,
    );
    render_logs(f, content_area, state, log_buffer);
    render_help(f, help_area, state);
}

fn render_logs(f: &mut Frame, area: Rect, state: &LogsState, log_buffer: &LogBuffer) {
    let entries = log_buffer.entries();
    let total = entries.len();

    if total == 0 {
        empty_state::render_empty_state(f, area, "Session Logs", "No logs yet", None);
        return;
    }

    // Newest entries at the bottom; offset counts rows scrolled up from there
    let inner_height = area.height.saturating_sub(4) as usize;
    let end = total.saturating_sub(state.scroll_offset);
    let start = end.saturating_sub(inner_height);

    let rows: Vec<Row> = entries[start..end].iter().map(log_row).collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(25),
        Constraint::Min(30),
    ];

    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Logs [{}-{} of {}] ",
            start + 1,
            end,
            total
        )))
        .header(
            Row::new(vec!["Time", "Level", "Target", "Message"])
                .style(theme::header_style())
                .bottom_margin(1),
        );

    f.render_widget(table, area);
}

fn log_row(entry: &LogEntry) -> Row<'static> {
    let (label, style) = level_label(entry.level);
    Row::new(vec![
        entry.timestamp.format("%H:%M:%S%.3f").to_string(),
        label.to_string(),
        truncate_target(&entry.target, 25),
        entry.message.clone(),
    ])
    .style(style)
}

fn level_label(level: Level) -> (&'static str, Style) {
    match level {
        Level::ERROR => ("ERROR", theme::error_style()),
        Level::WARN => ("WARN", theme::loading_style()),
        Level::INFO => ("INFO", Style::default().fg(theme::COLOR_POSITIVE)),
        Level::DEBUG => ("DEBUG", Style::default().fg(Color::Blue)),
        Level::TRACE => ("TRACE", Style::default().fg(theme::COLOR_ZERO)),
    }
}

fn render_help(f: &mut Frame, area: Rect, state: &LogsState) {
    let position = if state.scroll_offset > 0 {
        format!("{} up from newest", state.scroll_offset)
    } else {
        "newest".to_string()
    };

    help_bar::render_help_bar(
        f,
        area,
        &[
            ("j/k", "scroll"),
            ("G", "newest"),
            ("gg", "oldest"),
            ("PgUp/PgDn", "page"),
            ("h", "back"),
            ("at", &position),
        ],
    );
}

/// Keep the tail of a module path, which is the informative part
fn truncate_target(target: &str, max_len: usize) -> String {
    let count = target.chars().count();
    if count <= max_len {
        target.to_string()
    } else {
        let tail: String = target.chars().skip(count - max_len + 3).collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_target_keeps_tail() {
        assert_eq!(truncate_target("ledger_tui::app", 25), "ledger_tui::app");
        let long = "ledger_tui::commands::executor::editor";
        let truncated = truncate_target(long, 20);
        assert_eq!(truncated.chars().count(), 20);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with("executor::editor"));
    }
}

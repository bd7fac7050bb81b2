//! Logs panel component
//!
//! Shows the tail of the in-memory log buffer, color-coded by level. The
//! buffer is shared with the tracing layer, so the panel only reads it.

use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, entries: &[LogEntry], theme: &Theme) {
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let style = log_level_style(entry.level, theme);
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(format!("{:5} ", entry.level.as_str()), style),
                Span::styled(entry.message.as_str(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" System Logs "),
    );

    f.render_widget(list, area);
}

fn log_level_style(level: LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(theme.error),
        LogLevel::Warn => Style::default().fg(theme.warning),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

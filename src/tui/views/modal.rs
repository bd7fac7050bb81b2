// Modal overlay rendering
//
// Modals are rendered on top of the form:
// - Help modal: keyboard shortcuts and current theme
// - Notice: titled message (input warnings, LDAP errors, copy confirmation)

use crate::tui::app::App;
use crate::tui::modal::{Modal, NoticeLevel};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Notice {
            level,
            title,
            message,
        } => render_notice(f, app, *level, title, message),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.highlight);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.title)
        .add_modifier(Modifier::BOLD);

    // "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<14}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Form", header_style)),
        kb("Tab", "Next field"),
        kb("Shift+Tab", "Previous field"),
        kb("Enter", "Search (in a name field)"),
        kb("Ctrl+U", "Clear field"),
        Line::raw(""),
        Line::from(Span::styled("  Results", header_style)),
        kb("↑/↓, j/k", "Move selection"),
        kb("Enter", "Format and copy"),
        kb("Double-click", "Format and copy"),
        kb("Esc", "Quit"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("F1", "Toggle this help"),
        kb("Ctrl+C, Ctrl+Q", "Quit"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(&app.theme.name, key_style),
        ]),
    ]);

    let height = content.height() as u16 + 2;
    let area = centered_rect(48, height, f.area());

    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" F1 or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

fn render_notice(f: &mut Frame, app: &App, level: NoticeLevel, title: &str, message: &str) {
    let accent = match level {
        NoticeLevel::Info => app.theme.info,
        NoticeLevel::Warning => app.theme.warning,
        NoticeLevel::Error => app.theme.error,
    };

    let screen = f.area();
    let text_width = message
        .lines()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
        .max(title.width() + 4) as u16;
    let width = (text_width + 6).max(30).min(screen.width.saturating_sub(4));

    // Rough wrapped height: each line takes ceil(width / inner) rows
    let inner = width.saturating_sub(4).max(1) as usize;
    let body_lines: usize = message
        .lines()
        .map(|line| line.width().div_ceil(inner).max(1))
        .sum();
    let height = body_lines as u16 + 4;

    let area = centered_rect(width, height, screen);
    f.render_widget(Clear, area);

    let mut lines = vec![Line::raw("")];
    lines.extend(message.lines().map(|l| Line::from(l.to_string()).centered()));

    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .style(
            Style::default()
                .fg(app.theme.foreground)
                .bg(app.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(accent))
                .title(Span::styled(
                    format!(" {} ", title),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ))
                .title_bottom(Line::from(" Enter to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_clamped_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(20, 4, area), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_rect(60, 20, area), Rect::new(0, 0, 40, 10));
    }
}

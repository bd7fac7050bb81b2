// Views module - screen-level rendering
//
// The form is a single screen:
// - Title line
// - Name fields and the Search button
// - Results list
// - Output pane with the last copied snippet
// - System log pane (dropped on short terminals)
// - Status bar
//
// Overlays (modal, toast) are drawn last.

mod modal;

use super::app::{App, Focus, FormAreas};
use crate::tui::components::{logs_panel, status_bar};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Below this height the log pane is hidden to keep room for results
const MIN_HEIGHT_FOR_LOGS: u16 = 28;
const LOG_PANE_HEIGHT: u16 = 7;
const SEARCH_BUTTON_WIDTH: u16 = 16;

/// Main UI render function - called on every frame
///
/// Records the interactive regions on the App so mouse clicks can be
/// hit-tested against what was actually drawn.
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let show_logs = f.area().height >= MIN_HEIGHT_FOR_LOGS;
    let mut constraints = vec![
        Constraint::Length(1), // title
        Constraint::Length(3), // name fields + button
        Constraint::Min(5),    // results
        Constraint::Length(6), // output (four lines + border)
    ];
    if show_logs {
        constraints.push(Constraint::Length(LOG_PANE_HEIGHT));
    }
    constraints.push(Constraint::Length(2)); // status

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    render_title(f, chunks[0], app);

    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
            Constraint::Length(SEARCH_BUTTON_WIDTH),
        ])
        .split(chunks[1]);

    app.areas = FormAreas {
        first_name: inputs[0],
        last_name: inputs[1],
        search_button: inputs[2],
        results: chunks[2],
    };

    // No text cursor while an overlay is up
    let overlay = app.modal.is_some();
    app.first_name.render(
        f,
        inputs[0],
        "First Name",
        &app.theme,
        !overlay && app.focus == Focus::FirstName,
    );
    app.last_name.render(
        f,
        inputs[1],
        "Last Name",
        &app.theme,
        !overlay && app.focus == Focus::LastName,
    );
    render_search_button(f, inputs[2], app);

    let results_focused = app.focus == Focus::Results;
    app.results
        .render(f, chunks[2], &app.theme, results_focused);

    render_output(f, chunks[3], app);

    if show_logs {
        let area = chunks[4];
        let entries = app
            .log_buffer
            .tail(area.height.saturating_sub(2) as usize);
        logs_panel::render(f, area, &entries, &app.theme);
    }

    if let Some(&status_area) = chunks.last() {
        status_bar::render(f, status_area, app);
    }

    if let Some(modal_state) = &app.modal {
        modal::render(f, modal_state, app);
    }

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}

fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(
            " ldap-clip ",
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "search by name, Enter or double-click a result to copy",
            Style::default().fg(app.theme.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn render_search_button(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::SearchButton;
    let label = if app.is_searching() {
        format!("{} Searching", app.spinner())
    } else {
        "Search".to_string()
    };

    let (text_style, border_color) = if focused {
        (
            Style::default()
                .fg(app.theme.selection_fg)
                .bg(app.theme.selection)
                .add_modifier(Modifier::BOLD),
            app.theme.highlight,
        )
    } else {
        (Style::default().fg(app.theme.foreground), app.theme.border)
    };

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(text_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(border_color)),
        );
    f.render_widget(button, area);
}

fn render_output(f: &mut Frame, area: Rect, app: &App) {
    let body = if app.output.is_empty() {
        Paragraph::new("Select a result to format and copy it")
            .style(Style::default().fg(app.theme.muted))
    } else {
        Paragraph::new(app.output.as_str()).style(Style::default().fg(app.theme.foreground))
    };

    f.render_widget(
        body.block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border))
                .title(" Output "),
        ),
        area,
    );
}

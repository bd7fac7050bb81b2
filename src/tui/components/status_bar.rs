// Status bar component
//
// Renders the bound identity and the form state at the bottom.

use crate::tui::app::{App, FormState};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
///
/// Narrow terminals drop the server URL and keep only the state.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let state = match app.state {
        FormState::Idle => "ready".to_string(),
        FormState::Searching { .. } => format!("{} searching", app.spinner()),
        FormState::ResultsShown => format!("{} result(s)", app.results.len()),
        FormState::Selected { index } => format!(
            "copied row {} of {}",
            index + 1,
            app.results.len()
        ),
    };

    let status_text = if Breakpoint::from_width(area.width).at_least(Breakpoint::Normal) {
        format!(
            " {} @ {} │ {} │ F1 help",
            app.identity.username, app.identity.url, state
        )
    } else {
        format!(" {} │ F1", state)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}

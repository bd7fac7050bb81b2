// TUI module - the interactive search form
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks, search outcomes)
// - Spawning directory searches off the UI task

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod modal;
pub mod traits;
pub mod views;

use crate::directory::LdapDirectory;
use anyhow::{Context, Result};
use app::{App, Focus, SearchOutcome, SearchRequest};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use traits::{Handled, Interactive};

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// even when the loop fails.
pub async fn run_tui(mut app: App, directory: LdapDirectory) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &directory).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard and mouse input
/// 2. Timer ticks (spinner, toast expiry)
/// 3. Search outcomes from spawned tasks
///
/// Input handlers return a SearchRequest when a search should start; the
/// loop spawns it so the form keeps redrawing while the directory answers.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    directory: &LdapDirectory,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<SearchOutcome>(8);

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        let request = tokio::select! {
            request = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => None,
                    }
                } else {
                    None
                }
            } => request,

            _ = tick_interval.tick() => {
                app.tick();
                None
            }

            Some(outcome) = outcome_rx.recv() => {
                app.apply_outcome(outcome);
                None
            }
        };

        if let Some(request) = request {
            spawn_search(directory, request, outcome_tx.clone());
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Run one search on its own task and report the outcome
fn spawn_search(
    directory: &LdapDirectory,
    request: SearchRequest,
    outcome_tx: mpsc::Sender<SearchOutcome>,
) {
    let directory = directory.clone();
    tokio::spawn(async move {
        let result = directory.search(&request.criteria).await;
        let outcome = SearchOutcome {
            generation: request.generation,
            result,
        };
        if outcome_tx.send(outcome).await.is_err() {
            tracing::debug!("Form closed before search finished");
        }
    });
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → Focused component → Form actions
pub(crate) fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Option<SearchRequest> {
    // Release/Repeat events only arrive on some platforms; act on presses
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Layer 1: Modal captures all input when active
    if let Some(modal) = app.modal.as_mut() {
        if modal.handle_input(key_event.code) == ModalAction::Close {
            app.modal = None;
        }
        return None;
    }

    // Layer 2: Global keys
    if handle_global_keys(app, &key_event) {
        return None;
    }

    // Layer 3: Focused component
    let handled = match app.focus {
        Focus::FirstName => app.first_name.handle_key(key_event),
        Focus::LastName => app.last_name.handle_key(key_event),
        Focus::Results => app.results.handle_key(key_event),
        Focus::SearchButton => Handled::No,
    };
    if handled.was_handled() {
        return None;
    }

    // Layer 4: Form actions for whatever bubbled up
    match (app.focus, key_event.code) {
        (Focus::FirstName | Focus::LastName | Focus::SearchButton, KeyCode::Enter)
        | (Focus::SearchButton, KeyCode::Char(' ')) => app.submit_search(),
        (Focus::Results, KeyCode::Enter) => {
            app.select_highlighted();
            None
        }
        (Focus::Results, KeyCode::Esc) => {
            app.should_quit = true;
            None
        }
        (Focus::FirstName | Focus::LastName, KeyCode::Down) => {
            app.focus_next();
            None
        }
        (Focus::LastName | Focus::SearchButton, KeyCode::Up) => {
            app.focus_prev();
            None
        }
        _ => None,
    }
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            app.should_quit = true;
            true
        }
        KeyCode::F(1) => {
            app.modal = Some(Modal::help());
            true
        }
        KeyCode::BackTab => {
            app.focus_prev();
            true
        }
        KeyCode::Tab => {
            if key_event.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus_prev();
            } else {
                app.focus_next();
            }
            true
        }
        _ => false,
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) -> Option<SearchRequest> {
    if app.modal.is_some() {
        return None;
    }

    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.handle_click(mouse_event.column, mouse_event.row, Instant::now())
        }
        MouseEventKind::ScrollUp if app.focus == Focus::Results => {
            app.results
                .handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
            None
        }
        MouseEventKind::ScrollDown if app.focus == Focus::Results => {
            app.results
                .handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
            None
        }
        _ => None,
    }
}

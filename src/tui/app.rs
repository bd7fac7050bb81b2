// TUI application state
//
// The App owns every piece of form state: the two name fields, the result
// set on screen, the output pane and overlays. Searches leave the App as a
// SearchRequest and come back as a SearchOutcome tagged with the generation
// they were issued under; anything older than the current search is dropped.

use super::clipboard::ClipboardSink;
use super::components::{ResultsList, TextField, Toast};
use super::modal::Modal;
use crate::directory::{DirectoryEntry, DirectorySettings, SearchCriteria};
use crate::error::DirectoryError;
use crate::logging::LogBuffer;
use crate::snippet::Snippet;
use crate::theme::Theme;
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

/// Two clicks on the same row within this window count as a double-click
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Focusable parts of the form, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    FirstName,
    LastName,
    SearchButton,
    Results,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::FirstName => Focus::LastName,
            Focus::LastName => Focus::SearchButton,
            Focus::SearchButton => Focus::Results,
            Focus::Results => Focus::FirstName,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::FirstName => Focus::Results,
            Focus::LastName => Focus::FirstName,
            Focus::SearchButton => Focus::LastName,
            Focus::Results => Focus::SearchButton,
        }
    }
}

/// Where the form is in its search/select cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Searching {
        generation: u64,
    },
    ResultsShown,
    Selected {
        index: usize,
    },
}

/// A search the event loop should run off the UI task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub criteria: SearchCriteria,
}

/// Result of a search, reported back to the UI task
#[derive(Debug)]
pub struct SearchOutcome {
    pub generation: u64,
    pub result: Result<Vec<DirectoryEntry>, DirectoryError>,
}

/// Bound identity shown in the status bar
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub username: String,
    pub url: String,
}

impl From<&DirectorySettings> for Identity {
    fn from(settings: &DirectorySettings) -> Self {
        Self {
            username: settings.username.clone(),
            url: settings.url(),
        }
    }
}

/// Screen regions recorded at draw time for mouse hit-testing
#[derive(Debug, Clone, Copy, Default)]
pub struct FormAreas {
    pub first_name: Rect,
    pub last_name: Rect,
    pub search_button: Rect,
    pub results: Rect,
}

/// Main application state for the TUI
pub struct App {
    pub first_name: TextField,
    pub last_name: TextField,
    pub focus: Focus,
    pub results: ResultsList,

    /// Snippet of the last selection
    pub output: String,

    pub state: FormState,
    generation: u64,
    /// Generation of the search still awaiting its outcome
    in_flight: Option<u64>,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,

    /// Log buffer for system logs display
    pub log_buffer: LogBuffer,
    pub theme: Theme,
    pub identity: Identity,
    pub should_quit: bool,

    /// Advanced on every tick, drives the spinner
    pub animation_frame: usize,
    pub areas: FormAreas,
    last_click: Option<(usize, Instant)>,
    clipboard: Box<dyn ClipboardSink>,
}

impl App {
    pub fn new(
        log_buffer: LogBuffer,
        theme: Theme,
        identity: Identity,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            first_name: TextField::default(),
            last_name: TextField::default(),
            focus: Focus::default(),
            results: ResultsList::default(),
            output: String::new(),
            state: FormState::default(),
            generation: 0,
            in_flight: None,
            modal: None,
            toast: None,
            log_buffer,
            theme,
            identity,
            should_quit: false,
            animation_frame: 0,
            areas: FormAreas::default(),
            last_click: None,
            clipboard,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Validate the name fields and start a new search generation
    ///
    /// Returns `None` when nothing should be sent to the directory: a search
    /// is already running, or a name is missing (a dialog says so).
    pub fn submit_search(&mut self) -> Option<SearchRequest> {
        if self.is_searching() {
            self.show_toast("Search already in progress");
            return None;
        }

        let Some(criteria) = SearchCriteria::new(self.first_name.value(), self.last_name.value())
        else {
            self.modal = Some(Modal::warning(
                "Input Required",
                "Please enter both First Name and Last Name.",
            ));
            return None;
        };

        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.state = FormState::Searching {
            generation: self.generation,
        };
        tracing::info!(
            generation = self.generation,
            first = %criteria.first_name,
            last = %criteria.last_name,
            "Searching directory"
        );

        Some(SearchRequest {
            generation: self.generation,
            criteria,
        })
    }

    /// Apply a finished search; outcomes from older generations are ignored
    pub fn apply_outcome(&mut self, outcome: SearchOutcome) {
        if self.in_flight != Some(outcome.generation) {
            tracing::debug!(generation = outcome.generation, "Ignoring stale search result");
            return;
        }

        self.in_flight = None;
        self.last_click = None;
        match outcome.result {
            Ok(entries) => {
                self.results.replace(entries);
                self.state = FormState::ResultsShown;
                if self.results.is_empty() {
                    self.show_toast("No matching entries");
                } else {
                    self.focus = Focus::Results;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Directory search failed");
                self.results.clear();
                self.state = FormState::Idle;
                self.modal = Some(Modal::error("LDAP Error", e.to_string()));
            }
        }
    }

    /// Format row `index`, show it in the output pane and copy it
    ///
    /// Returns the rendered snippet, or `None` for an out-of-range row or
    /// while a search is running (the rows on screen are about to be replaced).
    pub fn select(&mut self, index: usize) -> Option<String> {
        if self.is_searching() {
            self.show_toast("Search in progress");
            return None;
        }

        let entry = self.results.get(index)?;
        let text = Snippet::from_entry(entry).render();

        self.results.select(index);
        self.output = text.clone();
        self.state = FormState::Selected { index };

        match self.clipboard.copy(&text) {
            Ok(()) => {
                tracing::info!(row = index, "Copied snippet to clipboard");
                self.modal = Some(Modal::info("Copied", "Text copied to clipboard."));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard write failed");
                self.modal = Some(Modal::error("Clipboard Error", format!("{e:#}")));
            }
        }

        Some(text)
    }

    /// Select whatever row is highlighted in the results list
    pub fn select_highlighted(&mut self) -> Option<String> {
        let index = self.results.selected()?;
        self.select(index)
    }

    /// Left click at a terminal cell
    ///
    /// Clicking a field or the button focuses it (the button also submits);
    /// clicking a row highlights it, and a second click on the same row
    /// inside [`DOUBLE_CLICK_WINDOW`] selects it.
    pub fn handle_click(&mut self, column: u16, row: u16, now: Instant) -> Option<SearchRequest> {
        let position = Position::new(column, row);

        if self.areas.first_name.contains(position) {
            self.focus = Focus::FirstName;
        } else if self.areas.last_name.contains(position) {
            self.focus = Focus::LastName;
        } else if self.areas.search_button.contains(position) {
            self.focus = Focus::SearchButton;
            return self.submit_search();
        } else if self.areas.results.contains(position) {
            self.focus = Focus::Results;
            let index = self.results.row_at(self.areas.results, column, row)?;
            self.results.select(index);

            let double = matches!(
                self.last_click,
                Some((last, at)) if last == index && now.duration_since(at) <= DOUBLE_CLICK_WINDOW
            );
            if double {
                self.last_click = None;
                self.select(index);
            } else {
                self.last_click = Some((index, now));
            }
        }
        None
    }

    /// Advance animations and drop an expired toast
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn spinner(&self) -> char {
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::clipboard::testing::RecordingClipboard;
    use crate::tui::modal::NoticeLevel;

    fn app_with(clipboard: RecordingClipboard) -> App {
        App::new(
            LogBuffer::new(),
            Theme::default(),
            Identity::default(),
            Box::new(clipboard),
        )
    }

    fn person(given: &str, sn: &str, uid: &str) -> DirectoryEntry {
        DirectoryEntry::new(format!("uid={uid},ou=people,dc=example,dc=com"))
            .with_attr("givenName", [given])
            .with_attr("sn", [sn])
            .with_attr("uid", [uid])
            .with_attr("cn", [format!("{given} {sn}")])
    }

    fn searched(app: &mut App) -> u64 {
        app.first_name.set_value("Jo");
        app.last_name.set_value("Smi");
        app.submit_search().map(|r| r.generation).unwrap()
    }

    fn modal_title(app: &App) -> Option<&str> {
        match &app.modal {
            Some(Modal::Notice { title, .. }) => Some(title),
            _ => None,
        }
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut focus = Focus::FirstName;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::FirstName);
        assert_eq!(Focus::FirstName.prev(), Focus::Results);
    }

    #[test]
    fn missing_name_warns_without_searching() {
        let mut app = app_with(RecordingClipboard::default());
        app.first_name.set_value("John");
        app.last_name.set_value("   ");

        assert_eq!(app.submit_search(), None);
        assert_eq!(app.state, FormState::Idle);
        assert!(matches!(
            app.modal,
            Some(Modal::Notice {
                level: NoticeLevel::Warning,
                ..
            })
        ));
        assert_eq!(modal_title(&app), Some("Input Required"));
    }

    #[test]
    fn submit_trims_and_tags_generation() {
        let mut app = app_with(RecordingClipboard::default());
        app.first_name.set_value("  John ");
        app.last_name.set_value("Smith");

        let request = app.submit_search().unwrap();
        assert_eq!(request.generation, 1);
        assert_eq!(request.criteria.first_name, "John");
        assert_eq!(app.state, FormState::Searching { generation: 1 });
    }

    #[test]
    fn second_submit_while_searching_is_refused() {
        let mut app = app_with(RecordingClipboard::default());
        searched(&mut app);
        assert_eq!(app.submit_search(), None);
        assert!(app.toast.is_some());
    }

    #[test]
    fn outcome_replaces_results_and_focuses_list() {
        let mut app = app_with(RecordingClipboard::default());
        let generation = searched(&mut app);

        app.apply_outcome(SearchOutcome {
            generation,
            result: Ok(vec![
                person("John", "Smith", "jsmith"),
                person("Joan", "Smiley", "jsmiley"),
            ]),
        });

        assert_eq!(app.state, FormState::ResultsShown);
        assert_eq!(app.results.len(), 2);
        assert_eq!(app.results.labels()[1], "Joan Smiley (jsmiley)");
        assert_eq!(app.focus, Focus::Results);
    }

    #[test]
    fn empty_outcome_shows_toast() {
        let mut app = app_with(RecordingClipboard::default());
        let generation = searched(&mut app);
        app.apply_outcome(SearchOutcome {
            generation,
            result: Ok(Vec::new()),
        });
        assert!(app.results.is_empty());
        assert_eq!(app.state, FormState::ResultsShown);
        assert!(app.toast.is_some());
    }

    #[test]
    fn stale_outcome_is_ignored() {
        let mut app = app_with(RecordingClipboard::default());
        let first = searched(&mut app);
        app.apply_outcome(SearchOutcome {
            generation: first,
            result: Ok(vec![person("John", "Smith", "jsmith")]),
        });

        let second = searched(&mut app);
        app.apply_outcome(SearchOutcome {
            generation: first,
            result: Ok(vec![person("Late", "Reply", "late")]),
        });
        assert_eq!(app.state, FormState::Searching { generation: second });
        assert_eq!(app.results.labels()[0], "John Smith (jsmith)");
    }

    #[test]
    fn selecting_during_search_keeps_the_new_results() {
        let clipboard = RecordingClipboard::default();
        let mut app = app_with(clipboard.clone());
        let first = searched(&mut app);
        app.apply_outcome(SearchOutcome {
            generation: first,
            result: Ok(vec![person("Old", "Row", "old")]),
        });

        let second = searched(&mut app);
        assert_eq!(app.select(0), None);
        assert!(clipboard.copies.borrow().is_empty());
        assert!(app.toast.is_some());

        app.apply_outcome(SearchOutcome {
            generation: second,
            result: Ok(vec![
                person("New", "One", "new1"),
                person("New", "Two", "new2"),
            ]),
        });
        assert_eq!(app.state, FormState::ResultsShown);
        assert_eq!(
            app.results.labels(),
            ["New One (new1)", "New Two (new2)"]
        );
        assert!(!app.is_searching());

        // The replaced list is selectable again, index-aligned
        let text = app.select(1).unwrap();
        assert!(text.starts_with("username := \"new2\""));
    }

    #[test]
    fn outcome_after_completion_is_ignored() {
        let mut app = app_with(RecordingClipboard::default());
        let generation = searched(&mut app);
        app.apply_outcome(SearchOutcome {
            generation,
            result: Ok(vec![person("John", "Smith", "jsmith")]),
        });
        app.apply_outcome(SearchOutcome {
            generation,
            result: Ok(Vec::new()),
        });
        assert_eq!(app.results.len(), 1);
    }

    #[test]
    fn failed_search_empties_list_and_shows_error() {
        let mut app = app_with(RecordingClipboard::default());
        let generation = searched(&mut app);
        app.apply_outcome(SearchOutcome {
            generation,
            result: Ok(vec![person("John", "Smith", "jsmith")]),
        });

        let generation = searched(&mut app);
        app.apply_outcome(SearchOutcome {
            generation,
            result: Err(DirectoryError::Bind {
                code: 49,
                message: "invalidCredentials".to_string(),
            }),
        });

        assert!(app.results.is_empty());
        assert_eq!(app.state, FormState::Idle);
        assert_eq!(modal_title(&app), Some("LDAP Error"));
    }

    #[test]
    fn select_formats_copies_and_confirms() {
        let clipboard = RecordingClipboard::default();
        let mut app = app_with(clipboard.clone());
        let generation = searched(&mut app);
        app.apply_outcome(SearchOutcome {
            generation,
            result: Ok(vec![
                person("John", "Smith", "jsmith"),
                person("Joan", "Smiley", "jsmiley"),
            ]),
        });

        let text = app.select(1).unwrap();
        assert!(text.starts_with("username := \"jsmiley\"\n"));
        assert!(text.contains("StrUpper(\"SMILEY\")"));
        assert_eq!(app.output, text);
        assert_eq!(app.state, FormState::Selected { index: 1 });
        assert_eq!(*clipboard.copies.borrow(), vec![text]);
        assert_eq!(modal_title(&app), Some("Copied"));

        assert_eq!(app.select(5), None);
    }

    #[test]
    fn clipboard_failure_still_updates_output() {
        let clipboard = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        let mut app = app_with(clipboard);
        let generation = searched(&mut app);
        app.apply_outcome(SearchOutcome {
            generation,
            result: Ok(vec![person("John", "Smith", "jsmith")]),
        });

        app.select(0);
        assert!(app.output.contains("jsmith"));
        assert_eq!(modal_title(&app), Some("Clipboard Error"));
    }

    #[test]
    fn double_click_on_same_row_selects() {
        let clipboard = RecordingClipboard::default();
        let mut app = app_with(clipboard.clone());
        let generation = searched(&mut app);
        app.apply_outcome(SearchOutcome {
            generation,
            result: Ok(vec![
                person("John", "Smith", "jsmith"),
                person("Joan", "Smiley", "jsmiley"),
            ]),
        });
        app.areas.results = Rect::new(0, 10, 40, 8);

        let t0 = Instant::now();
        // Single click highlights only
        app.handle_click(2, 12, t0);
        assert_eq!(app.results.selected(), Some(1));
        assert!(clipboard.copies.borrow().is_empty());

        // Different row resets the pair
        app.handle_click(2, 11, t0 + Duration::from_millis(100));
        assert!(clipboard.copies.borrow().is_empty());

        // Same row, inside the window
        app.handle_click(2, 11, t0 + Duration::from_millis(300));
        assert_eq!(clipboard.copies.borrow().len(), 1);
        assert_eq!(app.state, FormState::Selected { index: 0 });
    }

    #[test]
    fn slow_second_click_is_not_a_double_click() {
        let clipboard = RecordingClipboard::default();
        let mut app = app_with(clipboard.clone());
        let generation = searched(&mut app);
        app.apply_outcome(SearchOutcome {
            generation,
            result: Ok(vec![person("John", "Smith", "jsmith")]),
        });
        app.areas.results = Rect::new(0, 10, 40, 8);

        let t0 = Instant::now();
        app.handle_click(2, 11, t0);
        app.handle_click(2, 11, t0 + DOUBLE_CLICK_WINDOW + Duration::from_millis(1));
        assert!(clipboard.copies.borrow().is_empty());
    }

    #[test]
    fn clicking_the_button_submits() {
        let mut app = app_with(RecordingClipboard::default());
        app.first_name.set_value("John");
        app.last_name.set_value("Smith");
        app.areas.search_button = Rect::new(30, 4, 12, 3);

        let request = app.handle_click(31, 5, Instant::now());
        assert_eq!(request.map(|r| r.generation), Some(1));
        assert_eq!(app.focus, Focus::SearchButton);
    }
}

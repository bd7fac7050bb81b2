//! Search results list
//!
//! Owns the entries of the response currently on screen together with their
//! rendered labels, so row *i* always refers to entry *i*. Each search
//! replaces the whole set.

use super::scrollbar::render_scrollbar;
use crate::directory::DirectoryEntry;
use crate::snippet::display_label;
use crate::theme::Theme;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

#[derive(Debug, Default)]
pub struct ResultsList {
    entries: Vec<DirectoryEntry>,
    labels: Vec<String>,
    state: ListState,
    /// Visible rows at the last render, used for paging
    viewport: usize,
}

impl ResultsList {
    /// Replace the result set; the first row becomes selected
    pub fn replace(&mut self, entries: Vec<DirectoryEntry>) {
        self.labels = entries.iter().map(display_label).collect();
        self.entries = entries;
        self.state = ListState::default();
        if !self.entries.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DirectoryEntry> {
        self.entries.get(index)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Select a row; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.state.select(Some(index));
        }
    }

    fn move_by(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        let current = self.state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        self.state.select(Some(next));
    }

    /// Map a terminal row inside `area` (the bordered list) to an entry index
    pub fn row_at(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        if column < inner.x
            || column >= inner.right()
            || row < inner.y
            || row >= inner.bottom()
        {
            return None;
        }
        let index = self.state.offset() + (row - inner.y) as usize;
        (index < self.entries.len()).then_some(index)
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        self.viewport = area.height.saturating_sub(2) as usize;

        let items: Vec<ListItem> = self
            .labels
            .iter()
            .map(|label| ListItem::new(label.as_str()))
            .collect();

        let border_color = if focused {
            theme.highlight
        } else {
            theme.border
        };
        let title = if self.entries.is_empty() {
            " Results ".to_string()
        } else {
            format!(" Results ({}) ", self.entries.len())
        };

        let list = List::new(items)
            .style(Style::default().fg(theme.foreground))
            .highlight_style(
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            );

        f.render_stateful_widget(list, area, &mut self.state);
        render_scrollbar(
            f,
            area,
            self.entries.len(),
            self.viewport,
            self.state.offset(),
        );
    }
}

impl Interactive for ResultsList {
    /// Row navigation; Enter and Esc bubble up to the form
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let page = self.viewport.max(1) as isize;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::PageUp => self.move_by(-page),
            KeyCode::PageDown => self.move_by(page),
            KeyCode::Home | KeyCode::Char('g') => self.move_by(isize::MIN),
            KeyCode::End | KeyCode::Char('G') => self.move_by(isize::MAX),
            _ => return Handled::No,
        }
        Handled::Yes
    }
}

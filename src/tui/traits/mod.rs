//! Input contract for form components
//!
//! The App routes key events to the focused component through
//! [`Interactive`]; anything a component leaves unhandled bubbles up to the
//! form-level handlers (search, focus cycling, quit).

use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the App whether the component consumed the event or
/// if it should bubble up for form-level handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    /// Check if the event was handled
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

/// Components that handle keyboard input while focused
pub trait Interactive {
    /// Handle a key event, returning whether it was consumed
    fn handle_key(&mut self, key: KeyEvent) -> Handled;
}

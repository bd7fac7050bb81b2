// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
}

/// Severity of a notice dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Message dialog acknowledged with Enter or Esc
    Notice {
        level: NoticeLevel,
        title: String,
        message: String,
    },
}

impl Modal {
    /// Create a help modal
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::notice(NoticeLevel::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::notice(NoticeLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::notice(NoticeLevel::Error, title, message)
    }

    fn notice(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Modal::Notice {
            level,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Notice { .. } => match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => ModalAction::Close,
                _ => ModalAction::None,
            },
        }
    }
}

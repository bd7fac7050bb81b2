//! Clipboard access for the formatted snippet
//!
//! Uses `arboard` crate for cross-platform support (Windows, macOS, Linux).
//! The form talks to a [`ClipboardSink`] so tests can record writes instead
//! of touching the real clipboard.

use anyhow::{Context, Result};

/// Destination for copied text
pub trait ClipboardSink {
    /// Replace the clipboard contents with `text`
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// System clipboard, opened on each copy so no handle is held between selections
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        copy_to_clipboard(text)
    }
}

/// Clipboard for one-shot commands that exit right after copying
///
/// X11 and Wayland serve the clipboard from the process that set it, so
/// without a clipboard manager the text vanishes on exit. There the copy
/// blocks until another program takes the clipboard over. Other platforms
/// keep the contents after exit and copy normally.
#[derive(Debug, Default)]
pub struct HoldingClipboard;

/// Whether [`HoldingClipboard`] blocks to keep its contents alive
pub const HOLDS_UNTIL_REPLACED: bool = cfg!(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
));

impl ClipboardSink for HoldingClipboard {
    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    fn copy(&mut self, text: &str) -> Result<()> {
        use arboard::SetExtLinux;

        let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
        clipboard
            .set()
            .wait()
            .text(text)
            .context("Failed to set clipboard text")?;
        Ok(())
    }

    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    fn copy(&mut self, text: &str) -> Result<()> {
        copy_to_clipboard(text)
    }
}

/// Copy text to the system clipboard
///
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every copy; optionally fails
    #[derive(Clone, Default)]
    pub struct RecordingClipboard {
        pub copies: Rc<RefCell<Vec<String>>>,
        pub fail: bool,
    }

    impl ClipboardSink for RecordingClipboard {
        fn copy(&mut self, text: &str) -> Result<()> {
            if self.fail {
                anyhow::bail!("no display server");
            }
            self.copies.borrow_mut().push(text.to_string());
            Ok(())
        }
    }
}

//! Scrollbar rendering helper

use ratatui::{
    layout::{Margin, Rect},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Render a vertical scrollbar on the right border of a bordered panel
///
/// Only renders when `total` exceeds the `viewport`.
pub fn render_scrollbar(f: &mut Frame, area: Rect, total: usize, viewport: usize, offset: usize) {
    if total <= viewport {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None);

    // ScrollbarState wants how far the content can scroll, not its length
    let content_length = total.saturating_sub(viewport);
    let mut state = ScrollbarState::new(content_length).position(offset);

    f.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut state,
    );
}

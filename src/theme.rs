// Theme support for the TUI
//
// Provides color palettes that can be configured via config file.
// "terminal" uses the terminal's ANSI palette, named themes use true color (RGB).

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Notice colors
    pub error: Color,
    pub warning: Color,
    pub info: Color,

    // UI element colors
    pub status_bar: Color,
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub muted: Color,
    pub selection: Color,
    pub selection_fg: Color,

    // Terminal colors
    pub background: Color,
    pub foreground: Color,

    pub border_type: BorderType,
}

impl Theme {
    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "terminal" | "auto" => Self::terminal(),
            _ => Self::dark(), // "dark" or unknown
        }
    }

    /// Terminal theme - uses terminal's ANSI palette and default background
    pub fn terminal() -> Self {
        Self {
            name: "terminal".to_string(),
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Green,
            status_bar: Color::Green,
            title: Color::Cyan,
            border: Color::Gray,
            highlight: Color::Yellow,
            muted: Color::DarkGray,
            selection: Color::Blue,
            selection_fg: Color::White,
            background: Color::Reset,
            foreground: Color::Reset,
            border_type: BorderType::Plain,
        }
    }

    /// Dark theme (One Half Dark palette)
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            error: Color::Rgb(0xe0, 0x6c, 0x75),       // red
            warning: Color::Rgb(0xe5, 0xc0, 0x7b),     // yellow
            info: Color::Rgb(0x98, 0xc3, 0x79),        // green
            status_bar: Color::Rgb(0x98, 0xc3, 0x79),  // green
            title: Color::Rgb(0x56, 0xb6, 0xc2),       // cyan
            border: Color::Rgb(0x5c, 0x63, 0x70),      // comment
            highlight: Color::Rgb(0x61, 0xaf, 0xef),   // blue
            muted: Color::Rgb(0x5c, 0x63, 0x70),       // comment
            selection: Color::Rgb(0x3e, 0x44, 0x51),   // selection bg
            selection_fg: Color::Rgb(0xdc, 0xdf, 0xe4), // fg
            background: Color::Rgb(0x28, 0x2c, 0x34),
            foreground: Color::Rgb(0xdc, 0xdf, 0xe4),
            border_type: BorderType::Rounded,
        }
    }

    /// Light theme (One Half Light palette)
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            error: Color::Rgb(0xe4, 0x56, 0x49),
            warning: Color::Rgb(0xc1, 0x84, 0x01),
            info: Color::Rgb(0x50, 0xa1, 0x4f),
            status_bar: Color::Rgb(0x50, 0xa1, 0x4f),
            title: Color::Rgb(0x01, 0x84, 0xbc),
            border: Color::Rgb(0xa0, 0xa1, 0xa7),
            highlight: Color::Rgb(0x40, 0x78, 0xf2),
            muted: Color::Rgb(0xa0, 0xa1, 0xa7),
            selection: Color::Rgb(0xbf, 0xce, 0xff),
            selection_fg: Color::Rgb(0x38, 0x3a, 0x42),
            background: Color::Rgb(0xfa, 0xfa, 0xfa),
            foreground: Color::Rgb(0x38, 0x3a, 0x42),
            border_type: BorderType::Rounded,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

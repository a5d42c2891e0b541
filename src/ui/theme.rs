//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Base/overlay colour pair for one animated paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: Color,
    pub overlay: Color,
}

impl Palette {
    /// White text revealed in blue.
    pub const BLUE: Palette = Palette {
        base: Color::White,
        overlay: Color::LightBlue,
    };

    /// Grey text revealed in green.
    pub const GREEN: Palette = Palette {
        base: Color::DarkGray,
        overlay: Color::LightGreen,
    };

    pub fn base_style(self) -> Style {
        Style::default().fg(self.base)
    }

    pub fn overlay_style(self) -> Style {
        Style::default().fg(self.overlay)
    }
}

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── page ───────────────────────────────────────────────────
    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn debug_panel_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

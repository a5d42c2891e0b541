//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width and height of the debug panel in the top-right corner.
const DEBUG_PANEL_SIZE: (u16, u16) = (26, 5);

/// Primary screen layout: the scrolling page, a bottom status bar, and a
/// debug panel floating over the page's top-right corner.
pub struct AppLayout {
    pub page_area: Rect,
    pub status_area: Rect,
    pub debug_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // page (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);
        let page_area = chunks[0];

        let (w, h) = DEBUG_PANEL_SIZE;
        let w = w.min(page_area.width);
        let h = h.min(page_area.height);
        let debug_area = Rect {
            x: page_area.x + page_area.width.saturating_sub(w + 1),
            y: page_area.y + u16::from(page_area.height > h),
            width: w,
            height: h,
        };

        Self {
            page_area,
            status_area: chunks[1],
            debug_area,
        }
    }
}

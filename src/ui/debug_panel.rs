//! Debug readout — progress, current line and line count of one
//! animation, rendered in a small box in the top-right corner.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::app::animation::ScrollTextAnimation;

use super::theme::Theme;

pub struct DebugPanel<'a> {
    pub animation: &'a ScrollTextAnimation,
}

impl DebugPanel<'_> {
    /// The three readout lines, formatted for display.  Halves round away
    /// from zero; whole values print without a fractional part.
    pub fn lines(&self) -> [String; 3] {
        let a = self.animation;
        [
            format!("Scroll Progress: {}%", (a.progress() * 100.0).round()),
            format!("Current Line: {}", (a.current_line() * 10.0).round() / 10.0),
            format!("Total Lines: {}", a.total_lines()),
        ]
    }
}

impl Widget for DebugPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        let text: Vec<Line> = self.lines().into_iter().map(Line::from).collect();
        Clear.render(area, buf);
        Paragraph::new(text)
            .style(Theme::debug_panel_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border_style()),
            )
            .render(area, buf);
    }
}

//! Custom Ratatui widget that draws the visible slice of the demo page.
//!
//! Each paragraph is painted twice over the same cells: the base layer,
//! then the overlay layer clipped to the paragraph's reveal polygon.  A cell
//! belongs to the overlay when its centre lies inside the polygon.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::Line,
    widgets::Widget,
};

use crate::app::page::{Section, SectionKind};
use crate::app::state::{AppState, RevealBlock};
use crate::core::geometry::{self, ClipRegion};

use super::theme::Theme;

pub struct PageWidget<'a> {
    state: &'a AppState,
}

impl<'a> PageWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let layout = &self.state.layout;
        let view_top = self.state.scroll_y;
        let view_bottom = view_top + u32::from(area.height);
        let column_x = area.x + area.width.saturating_sub(layout.column_width) / 2;

        for section in &layout.sections {
            let top = section.top;
            let bottom = top + section.height;
            if bottom <= view_top || top >= view_bottom {
                continue;
            }

            match &section.kind {
                SectionKind::Heading(text) => {
                    let row = top + section.height / 2;
                    if (view_top..view_bottom).contains(&row) {
                        let y = area.y + (row - view_top) as u16;
                        let width = (text.chars().count() as u16).min(area.width);
                        let x = area.x + (area.width - width) / 2;
                        buf.set_line(x, y, &Line::styled(*text, Theme::heading_style()), width);
                    }
                }
                SectionKind::Text { block, rows } => {
                    let Some(block) = self.state.blocks.get(*block) else {
                        continue;
                    };
                    let clip = displayed_clip(block);
                    let placement = Placement {
                        column_x,
                        column_width: layout.column_width,
                        area,
                        view_top,
                    };
                    paint_paragraph(buf, section, rows, block, &clip, &placement);
                }
            }
        }
    }
}

/// Clip region for what is currently drawn (the eased progress, not the
/// published one).
fn displayed_clip(block: &RevealBlock) -> ClipRegion {
    let lines = block.animation.borrow().line_metrics();
    geometry::line_reveal(block.transition.displayed(), &lines)
}

struct Placement {
    column_x: u16,
    column_width: u16,
    area: Rect,
    view_top: u32,
}

fn paint_paragraph(
    buf: &mut Buffer,
    section: &Section,
    rows: &[String],
    block: &RevealBlock,
    clip: &ClipRegion,
    at: &Placement,
) {
    let row_count = rows.len().max(1) as f64;
    let col_count = f64::from(at.column_width.max(1));
    let base = block.palette.base_style();
    let overlay = block.palette.overlay_style();

    for (r, row) in rows.iter().enumerate() {
        let doc_row = section.top + r as u32;
        if doc_row < at.view_top || doc_row >= at.view_top + u32::from(at.area.height) {
            continue;
        }
        let y = at.area.y + (doc_row - at.view_top) as u16;
        let y_pct = (r as f64 + 0.5) / row_count * 100.0;

        for (c, ch) in row.chars().enumerate().take(usize::from(at.column_width)) {
            let x = at.column_x + c as u16;
            if x >= at.area.right() {
                break;
            }
            let x_pct = (c as f64 + 0.5) / col_count * 100.0;
            let style = if clip.contains(x_pct, y_pct) { overlay } else { base };
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }
}

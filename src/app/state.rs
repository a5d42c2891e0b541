//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! The state also plays the host for the reveal core: it answers
//! measurement queries and notifies the scroll/resize channels.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::config::AppConfig;
use crate::core::{
    metrics::{LineMetrics, Measure, ScrollMetrics},
    progress::AnimationConfig,
    style::Easing,
};
use crate::ui::{theme::Palette, transition::RevealTransition};

use super::animation::ScrollTextAnimation;
use super::channels::{Channel, HostChannels, Subscription};
use super::page::PageLayout;

/// Everything needed to build one animated paragraph.
#[derive(Debug, Clone)]
pub struct BlockSpec {
    pub text: String,
    pub animation: AnimationConfig,
    pub palette: Palette,
}

/// One animated paragraph on the page.
pub struct RevealBlock {
    pub text: String,
    pub palette: Palette,
    pub animation: Rc<RefCell<ScrollTextAnimation>>,
    /// Eases what is drawn toward the published progress.
    pub transition: RevealTransition,
    _subscription: Subscription,
}

/// Top-level application state.
pub struct AppState {
    /// Row layout of the document for the current viewport.
    pub layout: PageLayout,
    /// First document row shown at the top of the viewport.
    pub scroll_y: u32,
    pub blocks: Vec<RevealBlock>,
    /// Scroll/resize notification channels the blocks listen on.
    pub channels: HostChannels,
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Whether the debug panel is shown.
    pub show_debug: bool,
}

impl AppState {
    pub fn new(config: AppConfig, specs: Vec<BlockSpec>, width: u16, height: u16) -> Self {
        let channels = HostChannels::new();
        let blocks = specs
            .into_iter()
            .map(|spec| {
                let duration = spec.animation.transition_duration_ms();
                let animation = Rc::new(RefCell::new(ScrollTextAnimation::new(spec.animation)));
                let subscription = ScrollTextAnimation::attach(&animation, &channels);
                RevealBlock {
                    text: spec.text,
                    palette: spec.palette,
                    animation,
                    transition: RevealTransition::new(duration, Easing::default()),
                    _subscription: subscription,
                }
            })
            .collect::<Vec<_>>();

        let texts: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();
        let layout = PageLayout::compute(&texts, width, height);

        Self {
            layout,
            scroll_y: 0,
            blocks,
            channels,
            config,
            should_quit: false,
            show_debug: true,
        }
    }

    /// Re-lay out the page for a new viewport size and tell the blocks.
    pub fn relayout(&mut self, width: u16, height: u16) {
        let texts: Vec<&str> = self.blocks.iter().map(|b| b.text.as_str()).collect();
        let layout = PageLayout::compute(&texts, width, height);
        if layout == self.layout {
            return;
        }
        debug!(width, height, doc_height = layout.doc_height, "page relaid out");
        self.layout = layout;
        self.scroll_y = self.scroll_y.min(self.layout.max_scroll());
        self.channels.emit(Channel::Resize);
    }

    /// Scroll by `delta` rows (negative = up).  Returns `true` if the
    /// position changed.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let target = (i64::from(self.scroll_y) + delta).clamp(0, i64::from(self.layout.max_scroll()));
        self.scroll_to(target as u32)
    }

    pub fn scroll_to(&mut self, y: u32) -> bool {
        let y = y.min(self.layout.max_scroll());
        if y == self.scroll_y {
            return false;
        }
        self.scroll_y = y;
        self.channels.emit(Channel::Scroll);
        true
    }

    /// Run one frame: coalesced recomputes, then transitions.  Returns
    /// `true` when something visible changed.
    pub fn on_frame(&mut self, dt: Duration) -> bool {
        let layout = &self.layout;
        let scroll_y = self.scroll_y;
        let mut dirty = false;

        for (index, block) in self.blocks.iter_mut().enumerate() {
            let probe = BlockProbe {
                layout,
                scroll_y,
                block: index,
            };
            let mut animation = block.animation.borrow_mut();
            dirty |= animation.on_frame(&probe);

            block.transition.set_target(animation.progress());
            if block.transition.is_animating() {
                block.transition.tick(dt);
                dirty = true;
            }
        }
        dirty
    }

    /// Measurement view of paragraph `block`.
    pub fn probe(&self, block: usize) -> BlockProbe<'_> {
        BlockProbe {
            layout: &self.layout,
            scroll_y: self.scroll_y,
            block,
        }
    }
}

// ───────────────────────────────────────── host probe ────────

/// Answers the core's measurement queries for one paragraph, in rows.
pub struct BlockProbe<'a> {
    layout: &'a PageLayout,
    scroll_y: u32,
    block: usize,
}

impl Measure for BlockProbe<'_> {
    fn scroll_metrics(&self) -> Option<ScrollMetrics> {
        if self.layout.viewport_height == 0 {
            return None;
        }
        let section = self.layout.block(self.block)?;
        Some(ScrollMetrics {
            element_top: f64::from(section.top) - f64::from(self.scroll_y),
            element_height: f64::from(section.height),
            viewport_height: f64::from(self.layout.viewport_height),
            document_scroll_y: f64::from(self.scroll_y),
            document_scrollable_height: f64::from(self.layout.doc_height)
                - f64::from(self.layout.viewport_height),
        })
    }

    fn line_metrics(&self) -> Option<LineMetrics> {
        let section = self.layout.block(self.block)?;
        Some(LineMetrics::measure(1.0, f64::from(section.height)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::{LOREM, SECOND_PARAGRAPH};

    fn demo_state() -> AppState {
        let specs = vec![
            BlockSpec {
                text: LOREM.to_string(),
                animation: AnimationConfig::default().with_transition_ms(0),
                palette: Palette::BLUE,
            },
            BlockSpec {
                text: SECOND_PARAGRAPH.to_string(),
                animation: AnimationConfig::new(0.7, 0.3).unwrap().with_transition_ms(0),
                palette: Palette::GREEN,
            },
        ];
        AppState::new(AppConfig::default(), specs, 84, 40)
    }

    #[test]
    fn probe_reports_rows_relative_to_viewport() {
        let mut state = demo_state();
        state.scroll_to(10);
        let section = state.layout.block(0).unwrap().clone();
        let metrics = state.probe(0).scroll_metrics().unwrap();
        assert_eq!(metrics.element_top, f64::from(section.top) - 10.0);
        assert_eq!(metrics.element_height, f64::from(section.height));
        assert_eq!(metrics.viewport_height, 40.0);

        let lines = state.probe(0).line_metrics().unwrap();
        assert_eq!(lines.total_lines, section.height);
        assert!(state.probe(7).scroll_metrics().is_none());
    }

    #[test]
    fn scrolling_to_the_end_completes_every_block() {
        let mut state = demo_state();
        state.on_frame(Duration::from_millis(16));
        assert!(state.blocks.iter().all(|b| b.animation.borrow().progress() == 0.0));

        let end = state.layout.max_scroll();
        assert!(state.scroll_to(end));
        assert!(state.on_frame(Duration::from_millis(16)));
        for block in &state.blocks {
            let anim = block.animation.borrow();
            assert_eq!(anim.progress(), 1.0);
            assert!(anim.clip_region().is_full());
            assert_eq!(block.transition.displayed(), 1.0);
        }
    }

    #[test]
    fn scroll_is_clamped() {
        let mut state = demo_state();
        assert!(!state.scroll_by(-5));
        state.scroll_by(i64::from(u32::MAX));
        assert_eq!(state.scroll_y, state.layout.max_scroll());
    }

    #[test]
    fn resize_remeasures_lines() {
        let mut state = demo_state();
        state.on_frame(Duration::from_millis(16));
        let wide = state.blocks[0].animation.borrow().total_lines();

        state.relayout(44, 40);
        state.on_frame(Duration::from_millis(16));
        let narrow = state.blocks[0].animation.borrow().total_lines();
        assert!(narrow > wide);
    }
}

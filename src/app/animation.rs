//! One scroll-driven text reveal.
//!
//! [`ScrollTextAnimation`] owns everything a single animated paragraph
//! needs: the progress tracker, the cached line metrics and a frame slot
//! that coalesces recompute requests.  Channel callbacks only *request*
//! work; [`ScrollTextAnimation::on_frame`] does it, at most once per tick,
//! against fresh measurements from the host.
//!
//! The frame slot lives in its own shared cell, so a callback can queue a
//! request while the host is holding a borrow of the animation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::core::{
    geometry::{self, ClipRegion},
    metrics::{LineMetrics, Measure},
    progress::{AnimationConfig, ProgressTracker},
    style::OverlayStyle,
};

use super::channels::{HostChannels, Subscription};
use super::frame::FrameCoalescer;

/// What a pending frame has to redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// Re-read scroll position only.
    Progress,
    /// Layout may have reflowed: re-measure lines, then progress.
    Layout,
}

type FrameSlot = Rc<RefCell<FrameCoalescer<Recompute>>>;

/// Per-instance reveal state.
#[derive(Debug)]
pub struct ScrollTextAnimation {
    tracker: ProgressTracker,
    lines: LineMetrics,
    frame: FrameSlot,
}

impl ScrollTextAnimation {
    /// A fresh animation with a layout pass already queued, so the first
    /// frame measures lines and computes the initial progress.
    pub fn new(config: AnimationConfig) -> Self {
        let mut frame = FrameCoalescer::new();
        frame.request(Recompute::Layout);
        Self {
            tracker: ProgressTracker::new(config),
            lines: LineMetrics::default(),
            frame: Rc::new(RefCell::new(frame)),
        }
    }

    /// Ask for a recompute on the next frame.  A pending layout pass is
    /// never downgraded to a progress-only pass.
    pub fn request(&self, kind: Recompute) {
        queue(&self.frame, kind);
    }

    pub fn needs_frame(&self) -> bool {
        self.frame.borrow().is_pending()
    }

    /// Run the pending recompute, if any.  Returns `true` when the progress
    /// or line metrics changed.
    ///
    /// Measurements the host cannot provide (target not mounted) skip that
    /// part of the cycle; previous values are kept.
    pub fn on_frame(&mut self, host: &dyn Measure) -> bool {
        let Some(kind) = self.frame.borrow_mut().take_for_frame() else {
            return false;
        };

        let mut changed = false;
        if kind == Recompute::Layout {
            match host.line_metrics() {
                Some(lines) if lines != self.lines => {
                    debug!(
                        line_height = lines.line_height_px,
                        total_lines = lines.total_lines,
                        "line metrics changed"
                    );
                    self.lines = lines;
                    changed = true;
                }
                Some(_) => {}
                None => trace!("line metrics unavailable, keeping cached"),
            }
        }

        match host.scroll_metrics() {
            Some(metrics) => {
                if self.tracker.update(&metrics) {
                    debug!(progress = self.tracker.progress(), "progress updated");
                    changed = true;
                }
            }
            None => trace!("measurement target not mounted, skipping"),
        }
        changed
    }

    /// Wire this animation to a host's scroll/resize channels.  The
    /// callbacks hold only a weak reference to the frame slot, never to the
    /// animation itself; drop the returned [`Subscription`] to detach.
    pub fn attach(this: &Rc<RefCell<Self>>, channels: &HostChannels) -> Subscription {
        let slot = Rc::downgrade(&this.borrow().frame);
        let on_scroll = request_via(Weak::clone(&slot), Recompute::Progress);
        let on_resize = request_via(slot, Recompute::Layout);
        channels.subscribe(on_scroll, on_resize)
    }

    // ── queries ──────────────────────────────────────────────────

    pub fn config(&self) -> &AnimationConfig {
        self.tracker.config()
    }

    /// Published reveal progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.tracker.progress()
    }

    /// Fractional line position: `progress × total_lines`.
    pub fn current_line(&self) -> f64 {
        self.progress() * f64::from(self.lines.total_lines)
    }

    pub fn total_lines(&self) -> u32 {
        self.lines.total_lines
    }

    pub fn line_height(&self) -> f64 {
        self.lines.line_height_px
    }

    pub fn line_metrics(&self) -> LineMetrics {
        self.lines
    }

    pub fn clip_region(&self) -> ClipRegion {
        geometry::line_reveal(self.progress(), &self.lines)
    }

    pub fn overlay_style(&self) -> OverlayStyle {
        OverlayStyle::new(self.clip_region(), self.config().transition_duration_ms())
    }
}

/// Put `kind` in the slot.  A pending layout pass is never downgraded to a
/// progress-only pass.
fn queue(slot: &FrameSlot, kind: Recompute) {
    let mut frame = slot.borrow_mut();
    let merged = match frame.pending() {
        Some(Recompute::Layout) => Recompute::Layout,
        _ => kind,
    };
    frame.request(merged);
}

fn request_via(slot: Weak<RefCell<FrameCoalescer<Recompute>>>, kind: Recompute) -> impl FnMut() {
    move || {
        if let Some(slot) = slot.upgrade() {
            queue(&slot, kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::app::channels::Channel;
    use crate::core::metrics::ScrollMetrics;

    /// Host with adjustable measurements and a count of line queries.
    struct FakeHost {
        scroll: Option<ScrollMetrics>,
        lines: Option<LineMetrics>,
        line_queries: Cell<u32>,
    }

    impl FakeHost {
        fn at(top: f64) -> Self {
            Self {
                scroll: Some(ScrollMetrics {
                    element_top: top,
                    element_height: 100.0,
                    viewport_height: 1000.0,
                    document_scroll_y: 0.0,
                    document_scrollable_height: 3000.0,
                }),
                lines: Some(LineMetrics::new(20.0, 5)),
                line_queries: Cell::new(0),
            }
        }
    }

    impl Measure for FakeHost {
        fn scroll_metrics(&self) -> Option<ScrollMetrics> {
            self.scroll
        }

        fn line_metrics(&self) -> Option<LineMetrics> {
            self.line_queries.set(self.line_queries.get() + 1);
            self.lines
        }
    }

    // start line 800, end line -20 → span 820.

    #[test]
    fn first_frame_measures_lines_and_progress() {
        let host = FakeHost::at(390.0);
        let mut anim = ScrollTextAnimation::new(AnimationConfig::default());
        assert!(anim.needs_frame());
        assert!(anim.on_frame(&host));
        assert_eq!(anim.total_lines(), 5);
        assert_eq!(anim.line_height(), 20.0);
        assert!((anim.progress() - 0.5).abs() < 1e-12);
        assert!((anim.current_line() - 2.5).abs() < 1e-9);
        assert!(!anim.on_frame(&host), "slot is drained after one frame");
    }

    #[test]
    fn unmounted_target_keeps_previous_state() {
        let mut host = FakeHost::at(390.0);
        let mut anim = ScrollTextAnimation::new(AnimationConfig::default());
        anim.on_frame(&host);
        let before = anim.progress();

        host.scroll = None;
        host.lines = None;
        anim.request(Recompute::Layout);
        assert!(!anim.on_frame(&host));
        assert_eq!(anim.progress(), before);
        assert_eq!(anim.total_lines(), 5);
    }

    #[test]
    fn without_metrics_geometry_is_empty() {
        let mut host = FakeHost::at(-500.0);
        host.lines = None;
        let mut anim = ScrollTextAnimation::new(AnimationConfig::default());
        anim.on_frame(&host);
        assert_eq!(anim.progress(), 1.0);
        assert_eq!(anim.clip_region(), ClipRegion::empty());
    }

    #[test]
    fn scroll_after_resize_keeps_layout_pass() {
        let host = FakeHost::at(390.0);
        let mut anim = ScrollTextAnimation::new(AnimationConfig::default());
        anim.on_frame(&host);
        host.line_queries.set(0);

        anim.request(Recompute::Layout);
        anim.request(Recompute::Progress);
        anim.on_frame(&host);
        assert_eq!(host.line_queries.get(), 1);

        anim.request(Recompute::Progress);
        anim.on_frame(&host);
        assert_eq!(host.line_queries.get(), 1, "scroll alone does not re-measure");
    }

    #[test]
    fn channel_bursts_run_once_per_frame() {
        let channels = HostChannels::new();
        let anim = Rc::new(RefCell::new(ScrollTextAnimation::new(AnimationConfig::default())));
        let sub = ScrollTextAnimation::attach(&anim, &channels);

        let mut host = FakeHost::at(800.0);
        anim.borrow_mut().on_frame(&host);
        assert_eq!(anim.borrow().progress(), 0.0);

        host.scroll = host.scroll.map(|m| ScrollMetrics {
            element_top: -20.0,
            ..m
        });
        for _ in 0..10 {
            channels.emit(Channel::Scroll);
        }
        assert!(anim.borrow_mut().on_frame(&host));
        assert_eq!(anim.borrow().progress(), 1.0);
        assert_eq!(anim.borrow().clip_region(), ClipRegion::full());
        assert!(!anim.borrow().needs_frame());

        drop(sub);
        channels.emit(Channel::Scroll);
        assert!(!anim.borrow().needs_frame());
    }

    #[test]
    fn emit_while_host_holds_a_borrow_still_queues() {
        let channels = HostChannels::new();
        let anim = Rc::new(RefCell::new(ScrollTextAnimation::new(AnimationConfig::default())));
        let _sub = ScrollTextAnimation::attach(&anim, &channels);

        let mut host = FakeHost::at(800.0);
        anim.borrow_mut().on_frame(&host);
        assert_eq!(anim.borrow().progress(), 0.0);

        host.scroll = host.scroll.map(|m| ScrollMetrics {
            element_top: -200.0,
            ..m
        });
        {
            let reading = anim.borrow();
            assert_eq!(channels.emit(Channel::Scroll), 1);
            assert!(reading.needs_frame());
        }

        assert!(anim.borrow_mut().on_frame(&host));
        assert_eq!(anim.borrow().progress(), 1.0);
    }

    #[test]
    fn overlay_style_carries_transition() {
        let host = FakeHost::at(390.0);
        let config = AnimationConfig::default().with_transition_ms(120);
        let mut anim = ScrollTextAnimation::new(config);
        anim.on_frame(&host);
        let style = anim.overlay_style();
        assert_eq!(style.transition_duration_ms, 120);
        assert_eq!(style.clip_region, anim.clip_region());
    }
}

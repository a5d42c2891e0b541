//! Eased transition of the displayed reveal.
//!
//! The core publishes progress in steps (one per frame, with small changes
//! suppressed).  The overlay should not jump between those steps, so the
//! renderer draws a *displayed* progress that glides toward the published
//! one over the configured duration along the easing curve.

use std::time::Duration;

use crate::core::style::Easing;

/// Displayed-progress animator for one overlay.
#[derive(Debug, Clone)]
pub struct RevealTransition {
    /// Progress currently drawn.
    displayed: f64,
    /// Where `displayed` was when the current leg started.
    from: f64,
    /// Latest published progress.
    target: f64,
    /// Time spent in the current leg.
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl RevealTransition {
    pub fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            displayed: 0.0,
            from: 0.0,
            target: 0.0,
            elapsed: Duration::ZERO,
            duration: Duration::from_millis(duration_ms),
            easing,
        }
    }

    /// Feed the latest published progress.  A new target restarts the leg
    /// from wherever the overlay currently is.
    pub fn set_target(&mut self, target: f64) {
        if target != self.target {
            self.from = self.displayed;
            self.target = target;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Advance by one frame.
    pub fn tick(&mut self, dt: Duration) {
        if !self.is_animating() {
            return;
        }
        self.elapsed += dt;
        if self.duration.is_zero() || self.elapsed >= self.duration {
            self.displayed = self.target;
            return;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.displayed = self.from + (self.target - self.from) * self.easing.apply(t);
    }

    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    /// True until the displayed value has reached the target.
    pub fn is_animating(&self) -> bool {
        self.displayed != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_after_duration() {
        let mut t = RevealTransition::new(75, Easing::EaseOut);
        t.set_target(0.6);
        t.tick(Duration::from_millis(16));
        assert!(t.displayed() > 0.0 && t.displayed() < 0.6);
        for _ in 0..10 {
            t.tick(Duration::from_millis(16));
        }
        assert_eq!(t.displayed(), 0.6);
        assert!(!t.is_animating());
    }

    #[test]
    fn zero_duration_jumps() {
        let mut t = RevealTransition::new(0, Easing::EaseOut);
        t.set_target(0.3);
        t.tick(Duration::from_millis(1));
        assert_eq!(t.displayed(), 0.3);
    }

    #[test]
    fn retarget_starts_from_current_position() {
        let mut t = RevealTransition::new(100, Easing::Linear);
        t.set_target(1.0);
        t.tick(Duration::from_millis(50));
        let mid = t.displayed();
        assert!((mid - 0.5).abs() < 1e-9);

        t.set_target(0.0);
        t.tick(Duration::from_millis(50));
        assert!((t.displayed() - 0.25).abs() < 1e-9);
    }
}

//! Style descriptor handed to whatever paints the overlay layer.

use std::fmt;

use super::geometry::ClipRegion;

/// Timing curve for the overlay's clip transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// CSS timing-function identifier.
    pub fn css_name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }

    /// Evaluate the curve at `t ∈ [0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            // Cubic ease-out: fast start, slow finish.
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// What the overlay layer needs to draw the current reveal state.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub clip_region: ClipRegion,
    pub transition_duration_ms: u64,
    pub easing: Easing,
}

impl OverlayStyle {
    /// The only property the overlay transitions.
    pub const TRANSITION_PROPERTY: &'static str = "clip-path";

    pub fn new(clip_region: ClipRegion, transition_duration_ms: u64) -> Self {
        Self {
            clip_region,
            transition_duration_ms,
            easing: Easing::default(),
        }
    }

    /// The clip region as a CSS `polygon(...)` string.
    pub fn clip_path(&self) -> String {
        self.clip_region.to_string()
    }

    /// Inline CSS declarations for the overlay element.
    pub fn to_css(&self) -> String {
        format!(
            "clip-path: {}; transition-duration: {}ms; transition-timing-function: {}; transition-property: {};",
            self.clip_region,
            self.transition_duration_ms,
            self.easing,
            Self::TRANSITION_PROPERTY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_declarations() {
        let style = OverlayStyle::new(ClipRegion::full(), 75);
        assert_eq!(
            style.to_css(),
            "clip-path: polygon(0% 0%, 100% 0%, 100% 100%, 0% 100%); \
             transition-duration: 75ms; transition-timing-function: ease-out; \
             transition-property: clip-path;"
        );
    }

    #[test]
    fn easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }
}

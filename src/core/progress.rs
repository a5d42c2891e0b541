//! Scroll → progress mapping.
//!
//! Two independent signals are combined into one reveal fraction:
//!
//! * the **element signal** — where the animated element sits relative to
//!   the viewport, between a start line (`start_offset` of the viewport
//!   height) and an end line (`end_offset` of the element's height above
//!   the viewport top);
//! * the **document signal** — how far the whole document has scrolled,
//!   remapped through an optional threshold window.
//!
//! Both gates must open for the reveal to advance, so the result is their
//! minimum.

use tracing::trace;

use super::error::{unit_fraction, ConfigError};
use super::metrics::ScrollMetrics;

/// Changes at or below this size are ignored to damp scroll jitter.
pub const UPDATE_EPSILON: f64 = 0.001;

// ───────────────────────────────────────── config ────────────

/// Document-scroll window mapped onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdWindow {
    pub min: f64,
    pub max: f64,
}

impl ThresholdWindow {
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        let min = unit_fraction("min_threshold", min)?;
        let max = unit_fraction("max_threshold", max)?;
        if min > max {
            return Err(ConfigError::InvertedThresholds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Remap a document scroll fraction through the window.
    ///
    /// A zero-width window (`min == max`) is a step at that threshold:
    /// anything before it is `0`, anything at or past it is `1`.
    pub fn apply(&self, document_progress: f64) -> f64 {
        if document_progress < self.min {
            0.0
        } else if document_progress > self.max {
            1.0
        } else if self.max > self.min {
            (document_progress - self.min) / (self.max - self.min)
        } else {
            1.0
        }
    }
}

/// Per-instance animation settings.  Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    start_offset: f64,
    end_offset: f64,
    thresholds: Option<ThresholdWindow>,
    transition_duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start_offset: Self::DEFAULT_START_OFFSET,
            end_offset: Self::DEFAULT_END_OFFSET,
            thresholds: None,
            transition_duration_ms: Self::DEFAULT_TRANSITION_MS,
        }
    }
}

impl AnimationConfig {
    pub const DEFAULT_START_OFFSET: f64 = 0.8;
    pub const DEFAULT_END_OFFSET: f64 = 0.2;
    pub const DEFAULT_TRANSITION_MS: u64 = 75;

    pub fn new(start_offset: f64, end_offset: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            start_offset: unit_fraction("start_offset", start_offset)?,
            end_offset: unit_fraction("end_offset", end_offset)?,
            ..Self::default()
        })
    }

    /// Gate the reveal on whole-document scroll as well.
    pub fn with_thresholds(mut self, min: f64, max: f64) -> Result<Self, ConfigError> {
        self.thresholds = Some(ThresholdWindow::new(min, max)?);
        Ok(self)
    }

    pub fn with_transition_ms(mut self, ms: u64) -> Self {
        self.transition_duration_ms = ms;
        self
    }

    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    pub fn end_offset(&self) -> f64 {
        self.end_offset
    }

    pub fn thresholds(&self) -> Option<ThresholdWindow> {
        self.thresholds
    }

    pub fn transition_duration_ms(&self) -> u64 {
        self.transition_duration_ms
    }
}

// ───────────────────────────────────────── signals ───────────

/// Document signal.  Without a window the gate is always open.
pub fn threshold_progress(metrics: &ScrollMetrics, window: Option<ThresholdWindow>) -> f64 {
    match window {
        Some(w) => w.apply(metrics.document_progress()),
        None => 1.0,
    }
}

/// Element signal: `0` before the element reaches the start line, `1` once
/// it has scrolled past the end line, linear in between.
pub fn element_progress(metrics: &ScrollMetrics, start_offset: f64, end_offset: f64) -> f64 {
    let start = metrics.viewport_height * start_offset;
    let end = -metrics.element_height * end_offset;
    let top = metrics.element_top;

    if top <= start && top >= end {
        let span = start - end;
        if span > 0.0 {
            (start - top) / span
        } else {
            // start == end == top: the element sits exactly on both lines.
            1.0
        }
    } else if top < end {
        1.0
    } else {
        0.0
    }
}

/// Combined, clamped progress for one measurement.
pub fn combined_progress(metrics: &ScrollMetrics, config: &AnimationConfig) -> f64 {
    let document = threshold_progress(metrics, config.thresholds);
    let element = element_progress(metrics, config.start_offset, config.end_offset);
    clamp_unit(document.min(element))
}

/// Clamp to `[0, 1]`, mapping NaN to `0`.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

// ───────────────────────────────────────── tracker ───────────

/// Holds the last published progress value for one animation instance.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    config: AnimationConfig,
    progress: f64,
}

impl ProgressTracker {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            progress: 0.0,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Last published progress, always in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Recompute from a fresh measurement.  Returns `true` if the stored
    /// progress changed.
    pub fn update(&mut self, metrics: &ScrollMetrics) -> bool {
        let candidate = combined_progress(metrics, &self.config);
        self.apply(candidate)
    }

    /// Store `candidate` unless it is within [`UPDATE_EPSILON`] of the
    /// current value.
    pub fn apply(&mut self, candidate: f64) -> bool {
        let candidate = clamp_unit(candidate);
        if (candidate - self.progress).abs() <= UPDATE_EPSILON {
            trace!(
                current = self.progress,
                candidate,
                "progress change below epsilon, keeping current"
            );
            return false;
        }
        self.progress = candidate;
        true
    }
}

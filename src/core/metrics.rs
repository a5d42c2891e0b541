//! Measurement types reported by the host, and the trait the host
//! implements to report them.

// ───────────────────────────────────────── scroll ────────────

/// Snapshot of the element's geometry and the document's scroll state.
/// Recomputed on every scroll/resize event; never stored long-term.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Distance from the viewport top to the element's top edge (signed).
    pub element_top: f64,
    /// Rendered height of the element.
    pub element_height: f64,
    /// Height of the host viewport.
    pub viewport_height: f64,
    /// Current vertical scroll offset of the document.
    pub document_scroll_y: f64,
    /// Document height minus viewport height.  `<= 0` means the document
    /// cannot scroll.
    pub document_scrollable_height: f64,
}

impl ScrollMetrics {
    /// Fraction of the document scrolled, or `0.0` when the document
    /// cannot scroll.
    pub fn document_progress(&self) -> f64 {
        if self.document_scrollable_height > 0.0 {
            self.document_scroll_y / self.document_scrollable_height
        } else {
            0.0
        }
    }
}

// ───────────────────────────────────────── lines ─────────────

/// Line height and line count of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
    pub line_height_px: f64,
    pub total_lines: u32,
}

impl LineMetrics {
    pub fn new(line_height_px: f64, total_lines: u32) -> Self {
        Self {
            line_height_px,
            total_lines,
        }
    }

    /// Derive metrics from a computed line height and the content's scroll
    /// height: `total_lines = ceil(content_height / line_height)`.
    ///
    /// A zero, negative or non-finite line height yields zero lines, which
    /// the geometry treats as "not measured yet".
    pub fn measure(line_height_px: f64, content_scroll_height: f64) -> Self {
        if !(line_height_px.is_finite() && line_height_px > 0.0) {
            return Self::default();
        }
        let lines = (content_scroll_height.max(0.0) / line_height_px).ceil();
        Self {
            line_height_px,
            total_lines: if lines.is_finite() { lines as u32 } else { 0 },
        }
    }

    /// `true` when geometry can be computed from these metrics.
    pub fn is_measured(&self) -> bool {
        self.total_lines > 0 && self.line_height_px.is_finite() && self.line_height_px > 0.0
    }

    pub fn total_height(&self) -> f64 {
        f64::from(self.total_lines) * self.line_height_px
    }
}

// ───────────────────────────────────────── host ──────────────

/// Read-only measurement queries answered by the host environment.
///
/// `None` means the target is not mounted (or cannot be measured yet); the
/// caller skips that cycle and keeps its previous state.
pub trait Measure {
    fn scroll_metrics(&self) -> Option<ScrollMetrics>;
    fn line_metrics(&self) -> Option<LineMetrics>;
}

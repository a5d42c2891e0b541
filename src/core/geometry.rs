//! Progress → clip polygon.
//!
//! The overlay layer is clipped to a polygon in percentage coordinates
//! (origin top-left, both axes `0..=100`).  Lines before the current one are
//! revealed across their full width; the current line is revealed from the
//! left edge in proportion to how far progress has advanced through it.
//!
//! ```text
//!  (0,0) ┌────────────────────────┐ (100,0)
//!        │ completed lines        │
//!  (0,t) │        ┌───────────────┘ (100,t)
//!        │ current│ (w,t)
//!  (0,b) └────────┘ (w,b)
//! ```

use std::fmt;

use super::metrics::LineMetrics;
use super::progress::clamp_unit;

/// Partial-line widths below this (in percent) are dropped once at least
/// one line is complete, so no zero-width sliver is emitted.
pub const SNAP_WIDTH_PERCENT: f64 = 0.1;

// ───────────────────────────────────────── polygon ───────────

/// A vertex in percentage space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Visible area of the overlay layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRegion {
    vertices: Vec<Point>,
}

impl ClipRegion {
    /// Zero-area polygon that reveals nothing.
    pub fn empty() -> Self {
        Self::from_coords(&[(0.0, 0.0), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0)])
    }

    /// The whole rectangle.
    pub fn full() -> Self {
        Self::from_coords(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)])
    }

    fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self {
            vertices: coords.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Enclosed area in percent² (the full rectangle is `10_000`).
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0.0
    }

    pub fn is_full(&self) -> bool {
        self.area() >= 10_000.0
    }

    /// Even-odd test for a point in percentage space.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let v = &self.vertices;
        let mut inside = false;
        let mut j = v.len().wrapping_sub(1);
        for i in 0..v.len() {
            let (a, b) = (v[i], v[j]);
            if (a.y > y) != (b.y > y) && x < (b.x - a.x) * (y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// Formats as a CSS `polygon(...)` value.
impl fmt::Display for ClipRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("polygon(")?;
        for (i, p) in self.vertices.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}% {}%", trim_pct(p.x), trim_pct(p.y))?;
        }
        f.write_str(")")
    }
}

/// Round to four decimals and drop trailing zeros (`20.0000` → `20`).
fn trim_pct(value: f64) -> String {
    let s = format!("{value:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

// ───────────────────────────────────────── algorithm ─────────

/// Map a progress value and line metrics to the overlay's clip region.
///
/// Pure: the same inputs always produce the same polygon.  Unmeasured
/// metrics (no lines or no line height) reveal nothing.
pub fn line_reveal(progress: f64, lines: &LineMetrics) -> ClipRegion {
    if !lines.is_measured() {
        return ClipRegion::empty();
    }

    let total = f64::from(lines.total_lines);
    let line_float = clamp_unit(progress) * total;
    let index = line_float.floor();
    let fraction = (line_float - index).clamp(0.0, 1.0);
    let width = fraction * 100.0;

    if index >= total {
        return ClipRegion::full();
    }
    if index == 0.0 && fraction == 0.0 {
        return ClipRegion::empty();
    }
    reveal_at(index, width, lines)
}

/// Shape for a line `index` in `[0, total_lines)` revealed `width` percent
/// across.
fn reveal_at(index: f64, width: f64, lines: &LineMetrics) -> ClipRegion {
    let total_height = lines.total_height();
    let top = (index * lines.line_height_px / total_height * 100.0).clamp(0.0, 100.0);
    let bottom = ((index + 1.0) * lines.line_height_px / total_height * 100.0).clamp(0.0, 100.0);

    if index == 0.0 {
        return ClipRegion::from_coords(&[(0.0, 0.0), (width, 0.0), (width, bottom), (0.0, bottom)]);
    }

    if width < SNAP_WIDTH_PERCENT {
        return ClipRegion::from_coords(&[(0.0, 0.0), (100.0, 0.0), (100.0, top), (0.0, top)]);
    }

    ClipRegion::from_coords(&[
        (0.0, 0.0),
        (100.0, 0.0),
        (100.0, top),
        (width, top),
        (width, bottom),
        (0.0, bottom),
    ])
}

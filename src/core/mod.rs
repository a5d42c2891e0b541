//! Core algorithms – scroll → progress and progress → clip geometry.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Every
//! function is pure over its inputs; the only state is the last published
//! progress held by [`progress::ProgressTracker`].

pub mod error;
pub mod geometry;
pub mod metrics;
pub mod progress;
pub mod style;

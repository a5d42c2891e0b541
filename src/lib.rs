//! Scroll-driven, line-by-line text reveal.
//!
//! [`core`] turns scroll measurements into a reveal fraction and a reveal
//! fraction into a clip polygon.  [`app`] wraps that in a per-instance
//! animation object wired to a host's scroll/resize channels, and [`ui`]
//! draws it in a terminal.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;

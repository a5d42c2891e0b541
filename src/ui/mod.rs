//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the reveal state and turns it into cells on the
//! terminal.  No progress or geometry math happens here beyond asking the
//! core for a clip region.

pub mod debug_panel;
pub mod layout;
pub mod page_widget;
pub mod theme;
pub mod transition;

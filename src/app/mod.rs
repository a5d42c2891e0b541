//! Application orchestration — the reveal animation object, host channels,
//! frame coalescing, and the terminal demo's state and input handling.

pub mod animation;
pub mod channels;
pub mod event;
pub mod frame;
pub mod handler;
pub mod page;
pub mod state;

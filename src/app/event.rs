//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  The
//! same task emits a [`AppEvent::Frame`] on a fixed cadence, even while input
//! is streaming in, so scroll bursts never starve the redraw tick.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Redraw tick.  Carries the time since the previous one.
    Frame(Duration),
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(frame_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        let mut last_frame = Instant::now();
        loop {
            let until_frame = frame_interval.saturating_sub(last_frame.elapsed());
            let has_event = event::poll(until_frame).unwrap_or(false);
            if has_event {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => Some(AppEvent::Key(k)),
                        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
                        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(app_event) = app_event {
                        if tx.send(app_event).is_err() {
                            break; // receiver dropped
                        }
                    }
                }
            }

            let elapsed = last_frame.elapsed();
            if elapsed >= frame_interval {
                last_frame = Instant::now();
                if tx.send(AppEvent::Frame(elapsed)).is_err() {
                    break;
                }
            }
        }
    });

    rx
}

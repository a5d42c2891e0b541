//! Single-slot frame coalescing.
//!
//! Scroll events arrive far faster than frames are drawn.  Every request
//! lands in one slot, replacing whatever was pending; the frame tick drains
//! the slot.  At most one unit of work runs per frame and the last request
//! before the tick wins.

/// Holds at most one pending request of type `T`.
#[derive(Debug)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
    /// Requests that were replaced before a tick could run them.
    coalesced: u64,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            coalesced: 0,
        }
    }
}

impl<T> FrameCoalescer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `request`, returning the request it replaced (if any).
    pub fn request(&mut self, request: T) -> Option<T> {
        let replaced = self.pending.replace(request);
        if replaced.is_some() {
            self.coalesced += 1;
        }
        replaced
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drain the slot.  Call once per frame.
    pub fn take_for_frame(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_collapses_to_last_request() {
        let mut frame = FrameCoalescer::new();
        assert_eq!(frame.request(1), None);
        assert_eq!(frame.request(2), Some(1));
        assert_eq!(frame.request(3), Some(2));
        assert_eq!(frame.coalesced(), 2);

        assert_eq!(frame.take_for_frame(), Some(3));
        assert_eq!(frame.take_for_frame(), None);
    }

    #[test]
    fn idle_frame_does_nothing() {
        let mut frame: FrameCoalescer<()> = FrameCoalescer::new();
        assert!(!frame.is_pending());
        assert!(frame.take_for_frame().is_none());
    }
}

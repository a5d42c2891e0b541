//! Host change notifications.
//!
//! The host exposes two named channels, `scroll` and `resize`.  An
//! animation subscribes one callback to each and gets back a
//! [`Subscription`]; dropping it unregisters both callbacks.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`).  Callbacks are
//! snapshotted before delivery, so a callback may subscribe or drop a
//! subscription while an emit is in progress.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use tracing::debug;

/// The two change channels a host reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Scroll,
    Resize,
}

impl Channel {
    pub const ALL: &[Channel] = &[Channel::Scroll, Channel::Resize];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Scroll => "scroll",
            Channel::Resize => "resize",
        }
    }
}

type Callback = Rc<RefCell<dyn FnMut()>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    scroll: BTreeMap<u64, Callback>,
    resize: BTreeMap<u64, Callback>,
}

impl Registry {
    fn listeners(&self, channel: Channel) -> &BTreeMap<u64, Callback> {
        match channel {
            Channel::Scroll => &self.scroll,
            Channel::Resize => &self.resize,
        }
    }
}

/// Registry of scroll/resize observers for one host.  Cloning shares the
/// registry.
#[derive(Clone, Default)]
pub struct HostChannels {
    registry: Rc<RefCell<Registry>>,
}

impl HostChannels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scroll and a resize callback as one unit.
    pub fn subscribe<S, R>(&self, on_scroll: S, on_resize: R) -> Subscription
    where
        S: FnMut() + 'static,
        R: FnMut() + 'static,
    {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.scroll.insert(id, Rc::new(RefCell::new(on_scroll)));
        reg.resize.insert(id, Rc::new(RefCell::new(on_resize)));
        debug!(id, "channel subscription added");

        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Notify every listener on `channel`.  Returns how many ran.
    ///
    /// A listener that is already running further up the stack is skipped
    /// rather than re-entered.
    pub fn emit(&self, channel: Channel) -> usize {
        let snapshot: Vec<Callback> = self
            .registry
            .borrow()
            .listeners(channel)
            .values()
            .cloned()
            .collect();

        let mut delivered = 0;
        for callback in snapshot {
            if let Ok(mut f) = callback.try_borrow_mut() {
                (&mut *f)();
                delivered += 1;
            }
        }
        delivered
    }

    pub fn listener_count(&self, channel: Channel) -> usize {
        self.registry.borrow().listeners(channel).len()
    }
}

/// Disposer for a pair of channel callbacks.  Unregisters on drop.
#[must_use = "dropping a Subscription immediately unregisters its callbacks"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Subscription {
    /// Unregister now.  Equivalent to dropping.
    pub fn dispose(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // The host may already be gone; nothing to unregister then.
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut reg = registry.borrow_mut();
        reg.scroll.remove(&self.id);
        reg.resize.remove(&self.id);
        debug!(id = self.id, "channel subscription removed");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        (hits, move || h.set(h.get() + 1))
    }

    #[test]
    fn emits_reach_the_right_channel() {
        let channels = HostChannels::new();
        let (scrolls, on_scroll) = counter();
        let (resizes, on_resize) = counter();
        let _sub = channels.subscribe(on_scroll, on_resize);

        assert_eq!(channels.emit(Channel::Scroll), 1);
        channels.emit(Channel::Scroll);
        channels.emit(Channel::Resize);
        assert_eq!(scrolls.get(), 2);
        assert_eq!(resizes.get(), 1);
    }

    #[test]
    fn dropping_subscription_unregisters_both() {
        let channels = HostChannels::new();
        let (scrolls, on_scroll) = counter();
        let sub = channels.subscribe(on_scroll, || {});
        assert_eq!(channels.listener_count(Channel::Scroll), 1);
        assert_eq!(channels.listener_count(Channel::Resize), 1);

        sub.dispose();
        assert_eq!(channels.listener_count(Channel::Scroll), 0);
        assert_eq!(channels.listener_count(Channel::Resize), 0);
        assert_eq!(channels.emit(Channel::Scroll), 0);
        assert_eq!(scrolls.get(), 0);
    }

    #[test]
    fn subscription_outliving_host_is_harmless() {
        let channels = HostChannels::new();
        let sub = channels.subscribe(|| {}, || {});
        drop(channels);
        drop(sub);
    }

    #[test]
    fn listener_may_unsubscribe_during_emit() {
        let channels = HostChannels::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let s = Rc::clone(&slot);
        let sub = channels.subscribe(
            move || {
                s.borrow_mut().take();
            },
            || {},
        );
        *slot.borrow_mut() = Some(sub);

        assert_eq!(channels.emit(Channel::Scroll), 1);
        assert_eq!(channels.listener_count(Channel::Scroll), 0);
    }

    #[test]
    fn channel_names() {
        let names: Vec<_> = Channel::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["scroll", "resize"]);
    }
}

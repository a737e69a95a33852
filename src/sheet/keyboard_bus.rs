//! Keyboard notification centre with scoped subscriptions.
//!
//! The host publishes platform keyboard notifications here and delivers them
//! to the mounted sheet. A sheet holds its four subscriptions as one
//! [`KeyboardSubscriptions`] value; dropping the sheet releases them, so a
//! notification arriving after unmount has no listener left to reach.
//!
//! Single UI thread only: the bus is `Rc`-backed and deliberately `!Send`.

use crate::model::{KeyboardEventKind, KeyboardNotification};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct BusState {
    next_id: u64,
    listeners: BTreeMap<u64, KeyboardEventKind>,
    pending: VecDeque<KeyboardNotification>,
}

/// Platform keyboard notification centre.
#[derive(Debug, Clone, Default)]
pub struct KeyboardBus {
    state: Rc<RefCell<BusState>>,
}

impl KeyboardBus {
    /// Empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one notification kind.
    pub fn subscribe(&self, kind: KeyboardEventKind) -> KeyboardSubscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.insert(id, kind);
        KeyboardSubscription {
            id,
            kind,
            bus: Rc::downgrade(&self.state),
        }
    }

    /// Register listeners for all four notification kinds at once.
    pub fn subscribe_all(&self) -> KeyboardSubscriptions {
        KeyboardSubscriptions {
            will_show: self.subscribe(KeyboardEventKind::WillShow),
            will_hide: self.subscribe(KeyboardEventKind::WillHide),
            did_show: self.subscribe(KeyboardEventKind::DidShow),
            did_hide: self.subscribe(KeyboardEventKind::DidHide),
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Number of live listeners for `kind`.
    pub fn listeners_for(&self, kind: KeyboardEventKind) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|k| **k == kind)
            .count()
    }

    /// Queue a notification for delivery.
    ///
    /// Notifications with no listener for their kind are dropped.
    pub fn publish(&self, notification: KeyboardNotification) {
        let mut state = self.state.borrow_mut();
        if state.listeners.values().any(|k| *k == notification.kind) {
            state.pending.push_back(notification);
        }
    }

    /// Take every queued notification in arrival order.
    pub fn drain(&self) -> Vec<KeyboardNotification> {
        self.state.borrow_mut().pending.drain(..).collect()
    }
}

/// One registered listener. Unregisters on drop.
#[derive(Debug)]
pub struct KeyboardSubscription {
    id: u64,
    kind: KeyboardEventKind,
    bus: Weak<RefCell<BusState>>,
}

impl KeyboardSubscription {
    /// Kind this subscription listens for.
    pub fn kind(&self) -> KeyboardEventKind {
        self.kind
    }

    /// Whether the bus still exists and holds this registration.
    pub fn is_live(&self) -> bool {
        match self.bus.upgrade() {
            Some(state) => {
                let registered = state.borrow().listeners.contains_key(&self.id);
                registered
            }
            None => false,
        }
    }
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        if let Some(state) = self.bus.upgrade() {
            state.borrow_mut().listeners.remove(&self.id);
        }
    }
}

/// The four keyboard subscriptions a mounted sheet holds.
#[derive(Debug)]
pub struct KeyboardSubscriptions {
    will_show: KeyboardSubscription,
    will_hide: KeyboardSubscription,
    did_show: KeyboardSubscription,
    did_hide: KeyboardSubscription,
}

impl KeyboardSubscriptions {
    /// Whether a live subscription covers `kind`.
    pub fn covers(&self, kind: KeyboardEventKind) -> bool {
        let subscription = match kind {
            KeyboardEventKind::WillShow => &self.will_show,
            KeyboardEventKind::WillHide => &self.will_hide,
            KeyboardEventKind::DidShow => &self.did_show,
            KeyboardEventKind::DidHide => &self.did_hide,
        };
        subscription.is_live()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_all_registers_four_listeners() {
        let bus = KeyboardBus::new();
        let subs = bus.subscribe_all();
        assert_eq!(bus.listener_count(), 4);
        for kind in KeyboardEventKind::ALL {
            assert_eq!(bus.listeners_for(kind), 1);
            assert!(subs.covers(kind));
        }
    }

    #[test]
    fn dropping_subscriptions_releases_listeners() {
        let bus = KeyboardBus::new();
        let subs = bus.subscribe_all();
        drop(subs);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn publish_without_listener_is_dropped() {
        let bus = KeyboardBus::new();
        bus.publish(KeyboardNotification::will_show(300.0, None));
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn publish_and_drain_preserve_order() {
        let bus = KeyboardBus::new();
        let _subs = bus.subscribe_all();
        bus.publish(KeyboardNotification::will_show(300.0, None));
        bus.publish(KeyboardNotification::did_show(300.0));
        let drained = bus.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].kind, KeyboardEventKind::WillShow);
        assert_eq!(drained[1].kind, KeyboardEventKind::DidShow);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn subscription_outliving_bus_is_not_live() {
        let bus = KeyboardBus::new();
        let sub = bus.subscribe(KeyboardEventKind::WillHide);
        assert!(sub.is_live());
        drop(bus);
        assert!(!sub.is_live());
        assert_eq!(sub.kind(), KeyboardEventKind::WillHide);
    }

    #[test]
    fn cloned_bus_shares_listeners() {
        let bus = KeyboardBus::new();
        let other = bus.clone();
        let _sub = other.subscribe(KeyboardEventKind::DidHide);
        assert_eq!(bus.listener_count(), 1);
    }
}

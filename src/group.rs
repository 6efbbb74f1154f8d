//! Group exclusivity coordinator
//!
//! One page of switches can share an exclusivity group ("only one
//! destination calendar at a time"). Instead of a page-global event, the
//! parent view owns a `GroupBus`; each grouped switch registers a listener
//! on creation and deregisters when its subscription guard drops.
//!
//! Fan-out is synchronous and in-process: every listener registered at the
//! time of the call runs before `broadcast` returns. No queuing, no retry,
//! no delivery guarantee beyond that.
//!
//! Lock order is bus listener table first, then a switch's state cell.
//! Listeners must not call back into the bus.

use crate::models::GroupToggleSignal;
use log::debug;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// Name of the page-wide toggle channel, for log correlation.
pub const GROUP_TOGGLE_EVENT: &str = "calswitch:calendar-switch-group-toggle";

type Listener = Box<dyn Fn(&GroupToggleSignal) + Send + Sync>;

pub struct GroupBus {
    listeners: Mutex<HashMap<u64, Listener>>,
    next_id: AtomicU64,
}

impl GroupBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            listeners: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        })
    }

    /// Register a listener. Dropping the returned guard deregisters it.
    pub fn subscribe(self: &Arc<Self>, listener: Listener) -> GroupSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().unwrap().insert(id, listener);
        GroupSubscription {
            bus: Arc::downgrade(self),
            id,
        }
    }

    /// Deliver the signal to every currently registered listener before
    /// returning.
    pub fn broadcast(&self, signal: &GroupToggleSignal) {
        let listeners = self.listeners.lock().unwrap();
        debug!(
            "[{}] group '{}' signal from '{}', {} listener(s)",
            GROUP_TOGGLE_EVENT,
            signal.group_id,
            signal.unique_id,
            listeners.len()
        );
        for listener in listeners.values() {
            listener(signal);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

/// Drop guard for one switch's registration.
pub struct GroupSubscription {
    bus: Weak<GroupBus>,
    id: u64,
}

impl Drop for GroupSubscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.listeners.lock().unwrap().remove(&self.id);
        }
    }
}

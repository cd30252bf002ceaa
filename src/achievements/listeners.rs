//! Unlock observers.
//!
//! Listeners run synchronously, in registration order, on the thread that
//! performs the unlock. The table is shared behind an `Arc` so a
//! `Subscription` can remove its listener later without borrowing the
//! manager.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::debug;

use crate::achievements::types::Achievement;

pub type UnlockListener = Arc<dyn Fn(&Achievement) + Send + Sync>;

type ListenerId = u64;

#[derive(Default)]
struct ListenerTable {
    next_id: ListenerId,
    entries: Vec<(ListenerId, UnlockListener)>,
}

#[derive(Clone, Default)]
pub struct UnlockListeners {
    table: Arc<RwLock<ListenerTable>>,
}

impl UnlockListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Achievement) + Send + Sync + 'static,
    {
        let mut table = self.table.write();
        let id = table.next_id;
        table.next_id += 1;
        table.entries.push((id, Arc::new(listener)));
        debug!(listener_id = id, "unlock listener registered");

        Subscription {
            id,
            table: Arc::downgrade(&self.table),
        }
    }

    /// Calls every listener with `achievement`. The table lock is released
    /// before the calls, so a listener may subscribe or unsubscribe.
    pub fn notify(&self, achievement: &Achievement) {
        let listeners: Vec<UnlockListener> = self
            .table
            .read()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            (*listener)(achievement);
        }
    }

    pub fn len(&self) -> usize {
        self.table.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for UnlockListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnlockListeners")
            .field("len", &self.len())
            .finish()
    }
}

/// Handle returned by `subscribe`. Dropping it keeps the listener
/// registered; call `unsubscribe` to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: ListenerId,
    table: Weak<RwLock<ListenerTable>>,
}

impl Subscription {
    /// Returns `false` when the listener was already gone.
    pub fn unsubscribe(self) -> bool {
        let Some(table) = self.table.upgrade() else {
            return false;
        };
        let mut table = table.write();
        let before = table.entries.len();
        table.entries.retain(|(id, _)| *id != self.id);
        let removed = table.entries.len() < before;
        if removed {
            debug!(listener_id = self.id, "unlock listener removed");
        }
        removed
    }
}

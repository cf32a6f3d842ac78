//! Deferred removal of completed orders from a dashboard's working set.
//!
//! Each scheduled removal is a Tokio task keyed by order id. Rescheduling an
//! id replaces its task, `cancel` aborts it, and dropping the scheduler
//! aborts everything still pending.

use crate::model::OrderId;
use crate::sync::LiveStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

struct Pending {
    ticket: u64,
    handle: JoinHandle<()>,
}

type PendingMap = Mutex<HashMap<OrderId, Pending>>;

fn lock(pending: &PendingMap) -> MutexGuard<'_, HashMap<OrderId, Pending>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct RemovalScheduler {
    live: LiveStore,
    grace: Duration,
    pending: Arc<PendingMap>,
    next_ticket: AtomicU64,
}

impl RemovalScheduler {
    pub fn new(live: LiveStore, grace: Duration) -> Self {
        Self {
            live,
            grace,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_ticket: AtomicU64::new(1),
        }
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Removes `id` from the working set once the grace period elapses.
    pub fn schedule(&self, id: OrderId) {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let live = self.live.clone();
        let grace = self.grace;
        let pending: Weak<PendingMap> = Arc::downgrade(&self.pending);

        // Held across spawn so the task cannot finish before it is recorded.
        let mut map = lock(&self.pending);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            // Deregister before removing: once `is_scheduled` is false the
            // order is gone or about to be.
            if let Some(pending) = pending.upgrade() {
                let mut map = lock(&pending);
                if map.get(&id).is_some_and(|p| p.ticket == ticket) {
                    map.remove(&id);
                }
            }
            live.remove_order(id).await;
        });
        if let Some(previous) = map.insert(id, Pending { ticket, handle }) {
            previous.handle.abort();
        }
        debug!(order_id = %id, grace_ms = grace.as_millis() as u64, "Removal scheduled");
    }

    /// Aborts a pending removal. Returns `false` when none was pending.
    pub fn cancel(&self, id: OrderId) -> bool {
        match lock(&self.pending).remove(&id) {
            Some(pending) => {
                pending.handle.abort();
                debug!(order_id = %id, "Removal cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_scheduled(&self, id: OrderId) -> bool {
        lock(&self.pending).contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }
}

impl Drop for RemovalScheduler {
    fn drop(&mut self) {
        for (_, pending) in lock(&self.pending).drain() {
            pending.handle.abort();
        }
    }
}

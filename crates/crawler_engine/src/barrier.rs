use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Counts outstanding crawl tasks so the initiator can join on all of them.
///
/// Every task is registered before it is spawned and signals `done` exactly
/// once when it exits, on every path. The ordering contract is that a parent
/// registers all of its children before its own `done`, so the count can only
/// reach zero once no further spawns are possible.
#[derive(Debug, Clone, Default)]
pub struct TaskBarrier {
    inner: Arc<BarrierInner>,
}

#[derive(Debug, Default)]
struct BarrierInner {
    outstanding: AtomicUsize,
    released: Notify,
}

impl TaskBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for one task about to be spawned.
    pub fn register(&self) {
        self.inner.outstanding.fetch_add(1, Ordering::AcqRel);
    }

    /// Signals that one registered task has finished.
    pub fn done(&self) {
        if self.inner.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.released.notify_waiters();
        }
    }

    /// Current number of registered, unfinished tasks.
    pub fn outstanding(&self) -> usize {
        self.inner.outstanding.load(Ordering::Acquire)
    }

    /// Blocks until the outstanding count reaches zero.
    ///
    /// Returns immediately if nothing is registered.
    pub async fn wait(&self) {
        loop {
            // Arm the notification before the check, so a `done` racing with
            // the check cannot be missed.
            let released = self.inner.released.notified();
            if self.outstanding() == 0 {
                return;
            }
            released.await;
        }
    }
}

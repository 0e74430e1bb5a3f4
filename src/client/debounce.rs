//! # Debouncer
//!
//! Cancellable delayed tasks keyed by an arbitrary key, typically
//! `(entity id, field)`. Scheduling under a key that already has a pending
//! task aborts that task and starts a new timer, so only the last scheduled
//! work runs.
//!
//! Once a timer has fired the work is detached from its key: a later
//! `schedule` or `cancel` no longer affects it.
//!
//! Dropping the `Debouncer` aborts everything still pending.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

struct Pending {
    generation: u64,
    handle: JoinHandle<()>,
}

type PendingMap<K> = Arc<Mutex<HashMap<K, Pending>>>;

fn lock<K>(pending: &Mutex<HashMap<K, Pending>>) -> MutexGuard<'_, HashMap<K, Pending>> {
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct Debouncer<K> {
    pending: PendingMap<K>,
    next_generation: AtomicU64,
}

impl<K> Default for Debouncer<K> {
    fn default() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` after `delay` unless another call for `key` replaces it first
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, key: K, delay: Duration, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let pending = Arc::clone(&self.pending);
        let task_key = key.clone();

        // Held across spawn and insert so the timer can't observe a stale entry.
        let mut entries = lock(&self.pending);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut entries = lock(&pending);
                if entries.get(&task_key).map(|p| p.generation) == Some(generation) {
                    entries.remove(&task_key);
                }
            }
            work.await;
        });

        if let Some(previous) = entries.insert(key, Pending { generation, handle }) {
            previous.handle.abort();
        }
    }

    /// Abort the pending work for `key`; returns whether anything was pending
    pub fn cancel(&self, key: &K) -> bool {
        match lock(&self.pending).remove(key) {
            Some(previous) => {
                previous.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        for (_, previous) in lock(&self.pending).drain() {
            previous.handle.abort();
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        lock(&self.pending).contains_key(key)
    }

    /// Number of timers that have not fired yet
    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for (_, previous) in lock(&self.pending).drain() {
            previous.handle.abort();
        }
    }
}

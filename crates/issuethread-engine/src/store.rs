use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use issuethread_types::ThreadState;

pub type WatcherId = u64;

/// Observer of the thread state.
///
/// Called synchronously after every mutation with the full post-mutation state.
/// Watchers should recompute from the whole state rather than patch incrementally.
pub trait StateWatcher: Send + Sync {
    fn on_change(&self, state: &ThreadState);
}

impl<F> StateWatcher for F
where
    F: Fn(&ThreadState) + Send + Sync,
{
    fn on_change(&self, state: &ThreadState) {
        self(state)
    }
}

struct StoreInner {
    state: Mutex<ThreadState>,
    /// Bumped under the state lock on every mutation
    version: AtomicU64,
    /// Version of the last snapshot handed to watchers
    delivered: Mutex<u64>,
    watchers: Mutex<Vec<(WatcherId, Arc<dyn StateWatcher>)>>,
    next_id: AtomicU64,
}

/// Reactive container for [`ThreadState`].
///
/// Every change goes through [`StateStore::mutate`]; one closure is one logical
/// mutation, so fields changed together are never observed half-updated.
#[derive(Clone)]
pub struct StateStore {
    inner: Arc<StoreInner>,
}

impl StateStore {
    pub fn new(state: ThreadState) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(state),
                version: AtomicU64::new(0),
                delivered: Mutex::new(0),
                watchers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> ThreadState {
        self.read(ThreadState::clone)
    }

    pub fn read<R>(&self, f: impl FnOnce(&ThreadState) -> R) -> R {
        let state = self.inner.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&state)
    }

    /// Apply one mutation, then notify watchers.
    ///
    /// The state lock is released before watchers run, so they may read the store.
    /// Watchers must not call `mutate` themselves.
    ///
    /// Concurrent mutations are delivered in lock order. A snapshot that lost the
    /// race to a newer one is dropped, so watchers never go back to older state.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut ThreadState) -> R) -> R {
        let (result, snapshot, version) = {
            let mut state = self.inner.state.lock().unwrap_or_else(|e| e.into_inner());
            let result = f(&mut state);
            let version = self.inner.version.fetch_add(1, Ordering::SeqCst) + 1;
            (result, state.clone(), version)
        };

        let mut delivered = self.inner.delivered.lock().unwrap_or_else(|e| e.into_inner());
        if version > *delivered {
            *delivered = version;
            self.notify(&snapshot);
        } else {
            tracing::trace!("Skipping stale state notification {}", version);
        }
        result
    }

    pub fn watch(&self, watcher: impl StateWatcher + 'static) -> WatcherId {
        self.watch_arc(Arc::new(watcher))
    }

    pub fn watch_arc(&self, watcher: Arc<dyn StateWatcher>) -> WatcherId {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let mut watchers = self.inner.watchers.lock().unwrap_or_else(|e| e.into_inner());
        watchers.push((id, watcher));
        id
    }

    /// Remove a watcher. Returns false if it was not registered.
    pub fn unwatch(&self, id: WatcherId) -> bool {
        let mut watchers = self.inner.watchers.lock().unwrap_or_else(|e| e.into_inner());
        let before = watchers.len();
        watchers.retain(|(wid, _)| *wid != id);
        watchers.len() != before
    }

    pub fn watcher_count(&self) -> usize {
        self.inner
            .watchers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    fn notify(&self, snapshot: &ThreadState) {
        let watchers: Vec<Arc<dyn StateWatcher>> = {
            let watchers = self.inner.watchers.lock().unwrap_or_else(|e| e.into_inner());
            watchers.iter().map(|(_, w)| Arc::clone(w)).collect()
        };
        for watcher in watchers {
            watcher.on_change(snapshot);
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(ThreadState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuethread_types::Reaction;

    #[test]
    fn test_watcher_sees_post_mutation_state() {
        let store = StateStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.watch(move |state: &ThreadState| {
            sink.lock().unwrap().push((state.current_page, state.comments.is_none()));
        });

        store.mutate(|s| {
            s.current_page = 3;
            s.comments = None;
        });
        store.mutate(|s| s.comments = Some(Vec::new()));

        assert_eq!(*seen.lock().unwrap(), vec![(3, true), (3, false)]);
    }

    #[test]
    fn test_co_mutation_is_one_notification() {
        let store = StateStore::default();
        let count = Arc::new(AtomicU64::new(0));
        let counter = count.clone();
        store.watch(move |_: &ThreadState| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.mutate(|s| {
            s.reactions.push(Reaction::heart(1, "alice"));
            s.current_page = 2;
        });

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_watcher_can_read_store() {
        let store = StateStore::default();
        let reader = store.clone();
        let observed = Arc::new(AtomicU64::new(0));
        let out = observed.clone();
        store.watch(move |_: &ThreadState| {
            out.store(reader.read(|s| s.current_page) as u64, Ordering::SeqCst);
        });

        store.mutate(|s| s.current_page = 5);
        assert_eq!(observed.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_concurrent_mutations_notify_in_order() {
        let store = StateStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.watch(move |state: &ThreadState| {
            sink.lock().unwrap().push(state.current_page);
        });

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let store = store.clone();
                scope.spawn(move || {
                    for _ in 0..50 {
                        store.mutate(|s| s.current_page += 1);
                    }
                });
            }
        });

        let seen = seen.lock().unwrap();
        assert!(seen.windows(2).all(|w| w[0] < w[1]), "out of order: {:?}", *seen);
        assert_eq!(seen.last().copied(), Some(1 + 8 * 50));
        assert_eq!(store.read(|s| s.current_page), 1 + 8 * 50);
    }

    #[test]
    fn test_unwatch() {
        let store = StateStore::default();
        let id = store.watch(|_: &ThreadState| {});
        assert_eq!(store.watcher_count(), 1);
        assert!(store.unwatch(id));
        assert!(!store.unwatch(id));
        assert_eq!(store.watcher_count(), 0);
    }
}

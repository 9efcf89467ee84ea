//! Shared store container.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use super::reducer::Reducer;

/// Holds one reducer's state behind a lock and notifies watchers on change.
///
/// Every dispatch is a synchronous single-step commit. Cloning yields
/// another handle to the same store; construct one per application root
/// (or per test) and pass it to consumers.
pub struct Store<R: Reducer> {
    state: Arc<Mutex<R::State>>,
    version: Arc<watch::Sender<u64>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            version: self.version.clone(),
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new(R::State::default())
    }
}

impl<R: Reducer> Store<R> {
    pub fn new(initial: R::State) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            state: Arc::new(Mutex::new(initial)),
            version: Arc::new(version),
        }
    }

    pub fn dispatch(&self, intent: R::Intent) {
        self.dispatch_and_select(intent, |_| ());
    }

    /// Dispatch and read from the resulting state under the same lock.
    pub fn dispatch_and_select<V>(
        &self,
        intent: R::Intent,
        select: impl FnOnce(&R::State) -> V,
    ) -> V {
        let (changed, value) = {
            let mut state = self.state.lock();
            let previous = std::mem::take(&mut *state);
            let next = R::reduce(previous.clone(), intent);
            let changed = next != previous;
            *state = next;
            (changed, select(&state))
        };
        if changed {
            self.version.send_modify(|v| *v = v.wrapping_add(1));
        }
        value
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> R::State {
        self.state.lock().clone()
    }

    pub fn select<V>(&self, select: impl FnOnce(&R::State) -> V) -> V {
        select(&self.state.lock())
    }

    /// Receiver that changes whenever a dispatch alters the state.
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}

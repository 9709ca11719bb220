//! Blocking FIFO stores.
//!
//! A store is an unbounded buffer of opaque items plus a FIFO queue of
//! pending getters.  The invariant that matters: items reach getters in the
//! order both arrived.  If getter G1 suspended before G2, G1 is satisfied
//! first no matter how puts interleave after both are waiting.

use std::collections::VecDeque;

use crate::ids::{ProcessId, StoreId};

struct StoreState<T> {
    items:   VecDeque<T>,
    getters: VecDeque<ProcessId>,
}

/// Dense table of all stores created during a run.
pub(crate) struct StoreTable<T> {
    stores: Vec<StoreState<T>>,
}

impl<T> Default for StoreTable<T> {
    fn default() -> Self {
        Self { stores: Vec::new() }
    }
}

impl<T> StoreTable<T> {
    pub fn create(&mut self) -> StoreId {
        let id = StoreId(self.stores.len() as u32);
        self.stores.push(StoreState {
            items:   VecDeque::new(),
            getters: VecDeque::new(),
        });
        id
    }

    /// Offer `item` to the store.
    ///
    /// If a getter is waiting, the item bypasses the buffer and is handed to
    /// the earliest-waiting getter — the returned pair must be scheduled by
    /// the caller.  Otherwise the item is buffered.  Put never blocks.
    #[must_use]
    pub fn put(&mut self, id: StoreId, item: T) -> Option<(ProcessId, T)> {
        let store = &mut self.stores[id.index()];
        match store.getters.pop_front() {
            Some(pid) => Some((pid, item)),
            None => {
                store.items.push_back(item);
                None
            }
        }
    }

    /// Remove and return the earliest buffered item, if any.
    pub fn take_item(&mut self, id: StoreId) -> Option<T> {
        self.stores[id.index()].items.pop_front()
    }

    /// Register `pid` as a pending getter, in arrival order.
    pub fn add_getter(&mut self, id: StoreId, pid: ProcessId) {
        self.stores[id.index()].getters.push_back(pid);
    }

    /// Buffered item count.  Does not count items already handed to getters.
    pub fn len(&self, id: StoreId) -> usize {
        self.stores[id.index()].items.len()
    }
}

//! One-shot synchronization events.
//!
//! An event transitions `pending → fired` exactly once.  Firing a fired
//! event is an error — the creating process owns the event's lifecycle and a
//! double fire means two entities believe they own it.

use crate::error::{KernelError, KernelResult};
use crate::ids::{EventId, ProcessId};

struct EventState {
    fired:   bool,
    /// Processes suspended on this event, in registration order.
    waiters: Vec<ProcessId>,
}

/// Dense table of all events created during a run.
///
/// Events are never reclaimed; a run creates a few per vehicle and the table
/// stays small relative to the trace it produces.
#[derive(Default)]
pub(crate) struct EventTable {
    events: Vec<EventState>,
}

impl EventTable {
    pub fn create(&mut self) -> EventId {
        let id = EventId(self.events.len() as u32);
        self.events.push(EventState { fired: false, waiters: Vec::new() });
        id
    }

    /// Mark `id` fired and drain its waiters in registration order.
    pub fn fire(&mut self, id: EventId) -> KernelResult<Vec<ProcessId>> {
        let state = self
            .events
            .get_mut(id.index())
            .ok_or(KernelError::UnknownEvent(id))?;
        if state.fired {
            return Err(KernelError::EventAlreadyFired(id));
        }
        state.fired = true;
        Ok(std::mem::take(&mut state.waiters))
    }

    pub fn is_fired(&self, id: EventId) -> KernelResult<bool> {
        self.events
            .get(id.index())
            .map(|s| s.fired)
            .ok_or(KernelError::UnknownEvent(id))
    }

    pub fn add_waiter(&mut self, id: EventId, pid: ProcessId) -> KernelResult<()> {
        self.events
            .get_mut(id.index())
            .ok_or(KernelError::UnknownEvent(id))?
            .waiters
            .push(pid);
        Ok(())
    }
}

//! The scheduler: owns all kernel state and drives processes to completion.

use crate::clock::{SimTime, VirtualClock, WakeupQueue};
use crate::error::{KernelError, KernelResult};
use crate::event::EventTable;
use crate::ids::{EventId, ProcessId, StoreId};
use crate::process::{Command, Process, Wake};
use crate::store::StoreTable;

type Slot<W, T> = Option<Box<dyn Process<W, T>>>;

/// A cooperative discrete-event kernel.
///
/// Holds the virtual clock, the wakeup queue, the process table and the
/// event/store tables.  `W` is the domain's shared world (passed by the
/// caller to [`run_until`][Kernel::run_until]); `T` is the opaque item type
/// stores carry.
///
/// The process table is two parallel arrays: the boxed process itself and
/// the pending [`Wake`] payload set when the process was scheduled.  A
/// process has at most one outstanding wakeup, so one payload slot suffices.
pub struct Kernel<W, T> {
    clock:  VirtualClock,
    queue:  WakeupQueue,
    slots:  Vec<Slot<W, T>>,
    wakes:  Vec<Option<Wake<T>>>,
    events: EventTable,
    stores: StoreTable<T>,
}

impl<W, T> Default for Kernel<W, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, T> Kernel<W, T> {
    pub fn new() -> Self {
        Self {
            clock:  VirtualClock::default(),
            queue:  WakeupQueue::default(),
            slots:  Vec::new(),
            wakes:  Vec::new(),
            events: EventTable::default(),
            stores: StoreTable::default(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Create a blocking FIFO store.
    pub fn create_store(&mut self) -> StoreId {
        self.stores.create()
    }

    /// Create a one-shot event in the pending state.
    pub fn create_event(&mut self) -> EventId {
        self.events.create()
    }

    /// Buffered item count of `store`.
    pub fn store_len(&self, store: StoreId) -> usize {
        self.stores.len(store)
    }

    /// Register a process and schedule its first resumption at the current
    /// time with [`Wake::Started`].
    pub fn spawn(&mut self, process: Box<dyn Process<W, T>>) -> KernelResult<ProcessId> {
        let pid = ProcessId(self.slots.len() as u32);
        self.slots.push(Some(process));
        self.wakes.push(None);
        schedule(&mut self.queue, &mut self.wakes, self.clock.now(), pid, Wake::Started)?;
        Ok(pid)
    }

    /// Drive the simulation until the wakeup queue is exhausted or the next
    /// wakeup lies strictly beyond `horizon`.
    ///
    /// The clock finishes at exactly `horizon`.  Processes still suspended at
    /// that point are abandoned in place — no drain, no cleanup callback.
    pub fn run_until(&mut self, world: &mut W, horizon: SimTime) -> KernelResult<SimTime> {
        while let Some((at, pid)) = self.queue.pop_due(horizon) {
            self.clock.advance_to(at);

            // Every queued wakeup has a pending payload; a missing one means
            // the entry is stale, which the one-wakeup-per-process rule rules
            // out.
            let Some(wake) = self.wakes.get_mut(pid.index()).and_then(Option::take) else {
                debug_assert!(false, "wakeup for {pid} with no pending payload");
                continue;
            };
            let Some(mut process) = self.slots[pid.index()].take() else {
                continue;
            };

            let command = {
                let mut env = Env {
                    now:    at,
                    queue:  &mut self.queue,
                    slots:  &mut self.slots,
                    wakes:  &mut self.wakes,
                    events: &mut self.events,
                    stores: &mut self.stores,
                };
                process.resume(&mut env, world, wake)?
            };

            match command {
                Command::Timeout(duration) => {
                    if !duration.is_finite() || duration < 0.0 {
                        return Err(KernelError::NegativeTimeout(duration));
                    }
                    let due = self.clock.now() + duration;
                    schedule(&mut self.queue, &mut self.wakes, due, pid, Wake::TimerElapsed)?;
                    self.slots[pid.index()] = Some(process);
                }
                Command::WaitEvent(event) => {
                    if self.events.is_fired(event)? {
                        let now = self.clock.now();
                        schedule(&mut self.queue, &mut self.wakes, now, pid, Wake::EventFired)?;
                    } else {
                        self.events.add_waiter(event, pid)?;
                    }
                    self.slots[pid.index()] = Some(process);
                }
                Command::Get(store) => {
                    match self.stores.take_item(store) {
                        Some(item) => {
                            let now = self.clock.now();
                            schedule(&mut self.queue, &mut self.wakes, now, pid, Wake::Received(item))?;
                        }
                        None => self.stores.add_getter(store, pid),
                    }
                    self.slots[pid.index()] = Some(process);
                }
                Command::Halt => {
                    // Slot stays empty; the process is gone.
                }
            }
        }

        self.clock.advance_to(horizon);
        log::debug!(
            "run_until reached {horizon}: {} wakeups abandoned",
            self.queue.len()
        );
        Ok(self.clock.now())
    }
}

/// Record a pending wakeup: one queue entry plus its payload.
fn schedule<T>(
    queue: &mut WakeupQueue,
    wakes: &mut [Option<Wake<T>>],
    at:    SimTime,
    pid:   ProcessId,
    wake:  Wake<T>,
) -> KernelResult<()> {
    queue.push(at, pid)?;
    wakes[pid.index()] = Some(wake);
    Ok(())
}

// ── Env ───────────────────────────────────────────────────────────────────────

/// Kernel operations available to a process inside [`Process::resume`].
///
/// Borrows every kernel table except the resumed process's own slot, which
/// the scheduler has temporarily taken out.
pub struct Env<'a, W, T> {
    now:    SimTime,
    queue:  &'a mut WakeupQueue,
    slots:  &'a mut Vec<Slot<W, T>>,
    wakes:  &'a mut Vec<Option<Wake<T>>>,
    events: &'a mut EventTable,
    stores: &'a mut StoreTable<T>,
}

impl<W, T> Env<'_, W, T> {
    /// Current virtual time.
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Create a one-shot event in the pending state.
    pub fn create_event(&mut self) -> EventId {
        self.events.create()
    }

    /// Fire `event`, scheduling all its waiters at the current time in
    /// registration order.  Firing a fired event is fatal.
    pub fn fire(&mut self, event: EventId) -> KernelResult<()> {
        let waiters = self.events.fire(event)?;
        for pid in waiters {
            schedule(self.queue, self.wakes, self.now, pid, Wake::EventFired)?;
        }
        Ok(())
    }

    /// Put `item` into `store`; hands it straight to the earliest pending
    /// getter if one is waiting.  Never blocks.
    pub fn put(&mut self, store: StoreId, item: T) -> KernelResult<()> {
        if let Some((getter, item)) = self.stores.put(store, item) {
            schedule(self.queue, self.wakes, self.now, getter, Wake::Received(item))?;
        }
        Ok(())
    }

    /// Buffered item count of `store`, without consuming.
    pub fn store_len(&self, store: StoreId) -> usize {
        self.stores.len(store)
    }

    /// Register a new process and schedule it at the current time with
    /// [`Wake::Started`].
    pub fn spawn(&mut self, process: Box<dyn Process<W, T>>) -> KernelResult<ProcessId> {
        let pid = ProcessId(self.slots.len() as u32);
        self.slots.push(Some(process));
        self.wakes.push(None);
        schedule(self.queue, self.wakes, self.now, pid, Wake::Started)?;
        Ok(pid)
    }
}

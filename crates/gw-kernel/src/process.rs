//! The `Process` trait — the kernel's extension point.
//!
//! A process is any logical unit of concurrent behavior: a signal loop, a
//! vehicle's trip, an arrival generator.  It is written as a state machine
//! that runs until it reaches a suspension point, then returns a [`Command`]
//! naming the condition it wants to be resumed on.  The kernel records that
//! condition and moves on; when the condition is satisfied it calls
//! [`resume`][Process::resume] again with a [`Wake`] explaining why.
//!
//! Processes never hold references to each other.  They communicate only
//! through kernel events and stores (by id) and through the shared world
//! value the kernel threads into every `resume` call.  Exactly one process
//! runs at any instant, so mutating the world needs no synchronization.

use crate::error::KernelResult;
use crate::ids::{EventId, StoreId};
use crate::kernel::Env;

/// Why a process was resumed.
#[derive(Debug)]
pub enum Wake<T> {
    /// First resumption after `spawn`.
    Started,
    /// The `Timeout` the process suspended on has elapsed.
    TimerElapsed,
    /// The event the process was waiting on fired.
    EventFired,
    /// A store handed the process the item it was getting.
    Received(T),
}

/// The suspension a process requests when it yields control.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Wake again after `duration` virtual seconds.  Negative durations are a
    /// fatal configuration error; zero reschedules at the current instant,
    /// after everything already queued for it.
    Timeout(f64),
    /// Wake when the event fires.  An already-fired event resumes the
    /// process at the current time without queueing it as a waiter.
    WaitEvent(EventId),
    /// Wake with the earliest item from the store, suspending if it is empty.
    Get(StoreId),
    /// The process is finished; drop it.
    Halt,
}

/// A cooperatively scheduled simulation process.
///
/// `W` is the shared world type, `T` the item type carried by stores.
pub trait Process<W, T> {
    /// Run until the next suspension point.
    ///
    /// `wake` says why the process was resumed; `env` exposes the kernel
    /// operations legal at a suspension point (spawning, firing events,
    /// putting items, reading store depths).  Errors abort the run.
    fn resume(
        &mut self,
        env:   &mut Env<'_, W, T>,
        world: &mut W,
        wake:  Wake<T>,
    ) -> KernelResult<Command>;
}

//! Virtual time and the pending-wakeup queue.
//!
//! # Design
//!
//! Time is a continuous `f64` scalar that advances only when the wakeup queue
//! is popped — there is no relation to wall-clock time.  The queue is a
//! min-heap keyed by `(wake_time, sequence_number)`: the sequence number is a
//! monotonically increasing counter assigned when the wakeup is scheduled, so
//! two wakeups due at the same instant resume in the order they were
//! scheduled.  That tie-break is what makes whole runs reproducible from a
//! single seed.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use ordered_float::NotNan;

use crate::error::{KernelError, KernelResult};
use crate::ids::ProcessId;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An instant on the simulation's virtual timeline.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Virtual seconds elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// Heap key for this instant.  Fails on NaN, which can only arise from a
    /// non-finite delay slipping past timeout validation.
    pub(crate) fn key(self) -> KernelResult<NotNan<f64>> {
        NotNan::new(self.0).map_err(|_| KernelError::InvalidTime)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}

// ── VirtualClock ──────────────────────────────────────────────────────────────

/// Monotonically non-decreasing simulation clock.
#[derive(Debug, Default)]
pub(crate) struct VirtualClock {
    now: SimTime,
}

impl VirtualClock {
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock forward to `t`.  Moving it backward is a scheduler bug.
    #[inline]
    pub fn advance_to(&mut self, t: SimTime) {
        debug_assert!(t >= self.now, "clock moved backward: {} -> {}", self.now, t);
        self.now = t;
    }
}

// ── WakeupQueue ───────────────────────────────────────────────────────────────

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Wakeup {
    at:  NotNan<f64>,
    seq: u64,
    pid: ProcessId,
}

/// Min-heap of pending process wakeups.
#[derive(Default)]
pub(crate) struct WakeupQueue {
    heap:     BinaryHeap<Reverse<Wakeup>>,
    next_seq: u64,
}

impl WakeupQueue {
    /// Schedule `pid` to wake at `at`, assigning the next sequence number.
    pub fn push(&mut self, at: SimTime, pid: ProcessId) -> KernelResult<()> {
        let at = at.key()?;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Wakeup { at, seq, pid }));
        Ok(())
    }

    /// Pop the earliest wakeup if it is due at or before `horizon`.
    ///
    /// A wakeup strictly beyond the horizon stays queued: the run stops
    /// without executing it.
    pub fn pop_due(&mut self, horizon: SimTime) -> Option<(SimTime, ProcessId)> {
        let due = matches!(self.heap.peek(), Some(Reverse(w)) if w.at.into_inner() <= horizon.0);
        if !due {
            return None;
        }
        self.heap
            .pop()
            .map(|Reverse(w)| (SimTime(w.at.into_inner()), w.pid))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

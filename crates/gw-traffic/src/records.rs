//! Flat trace records emitted during a run.
//!
//! These are the run's externally consumed outputs, each an ordered
//! sequence of flat records: signal decisions, vehicle releases, vehicle
//! completions and periodic queue snapshots.  Export formats live in
//! `gw-output`; this module only defines the rows.

use crate::approach::Approach;
use crate::controller::Action;

/// One signal-loop decision at one intersection.
///
/// `phase` is the phase *after* the action was applied.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalRecord {
    pub time:         f64,
    pub intersection: String,
    pub phase:        Approach,
    pub queue_ns:     usize,
    pub queue_ew:     usize,
    pub action:       Action,
}

/// One vehicle released from a green queue.
///
/// `phase` is the approach the vehicle was queued on, the one that was
/// green when its release began.
#[derive(Clone, Debug, PartialEq)]
pub struct ReleaseRecord {
    pub time:         f64,
    pub intersection: String,
    pub vehicle:      String,
    pub phase:        Approach,
}

/// A vehicle that finished its whole route.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRecord {
    pub vehicle:     String,
    pub finish_time: f64,
    pub total_wait:  f64,
}

/// Queue depths and phase of one intersection at a monitor tick.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotRecord {
    pub time:         f64,
    pub intersection: String,
    pub queue_ns:     usize,
    pub queue_ew:     usize,
    pub phase:        Approach,
}

/// All records produced by one run, each in emission order.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct TraceLog {
    pub signals:     Vec<SignalRecord>,
    pub releases:    Vec<ReleaseRecord>,
    pub completions: Vec<CompletionRecord>,
    pub snapshots:   Vec<SnapshotRecord>,
}

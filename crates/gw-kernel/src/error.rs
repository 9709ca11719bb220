//! Kernel error type.
//!
//! Every kernel failure is a program invariant violation: there is nothing to
//! retry, so callers are expected to abort the run.

use thiserror::Error;

use crate::ids::EventId;

#[derive(Debug, Error, PartialEq)]
pub enum KernelError {
    #[error("timeout duration {0} is negative or non-finite")]
    NegativeTimeout(f64),

    #[error("event {0} fired twice")]
    EventAlreadyFired(EventId),

    #[error("event {0} does not exist")]
    UnknownEvent(EventId),

    #[error("wake time is not a number")]
    InvalidTime,
}

/// Shorthand result type for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;

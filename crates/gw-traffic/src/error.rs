//! Domain error type.

use gw_kernel::KernelError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TrafficError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("policy artifact {path}: {reason}")]
    PolicyArtifact { path: String, reason: String },

    #[error(transparent)]
    Kernel(#[from] KernelError),
}

/// Shorthand result type for the traffic domain.
pub type TrafficResult<T> = Result<T, TrafficError>;

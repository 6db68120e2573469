//! Error types for the Wobble kernel.
//!
//! All crates return `WobbleResult<T>` from fallible operations.
//! Numerical edge cases (singular matrices, degenerate frames, overflow)
//! are not errors: the kernel degrades locally and reports them in the
//! step report. Errors are reserved for contract violations by the host.

use thiserror::Error;

/// Unified error type for the Wobble kernel.
#[derive(Debug, Error)]
pub enum WobbleError {
    /// A caller-supplied buffer has the wrong length.
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A particle index is outside the body.
    #[error("Particle index {index} out of range (particle count: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The rest shape cannot seed a body (empty or non-finite).
    #[error("Invalid rest shape: {0}")]
    InvalidRestShape(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Timestep is zero, negative, or non-finite.
    #[error("Invalid timestep: {0}")]
    InvalidTimestep(f64),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, WobbleError>`.
pub type WobbleResult<T> = Result<T, WobbleError>;

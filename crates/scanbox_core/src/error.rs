//! Core error types

use thiserror::Error;

/// Errors raised while building core page state
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The trigger section offset is unusable as a divisor
    #[error("invalid trigger distance: {0} (must be finite and > 0)")]
    InvalidTriggerDistance(f32),

    /// Bounds were requested from an empty point set
    #[error("cannot compute bounds of an empty point set")]
    EmptyBounds,
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

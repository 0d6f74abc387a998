//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `PhysError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Construction-time failures shared by every `phys-*` crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhysError {
    #[error("agent count must be positive")]
    InvalidAgentCount,

    #[error("agent count {count} exceeds the addressable maximum {max}")]
    TooManyAgents { count: usize, max: usize },

    #[error("field dimensions must be positive, got {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },
}

/// Shorthand result type for `phys-core`.
pub type PhysResult<T> = Result<T, PhysError>;

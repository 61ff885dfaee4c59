//! Core error type.
//!
//! Downstream crates wrap `CoreError` as one variant of their own error enum
//! (`BoardError::Config`, …) rather than re-using it directly.

use thiserror::Error;

/// Errors raised while validating core value types and configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

/// Shorthand result type for `snake-core`.
pub type CoreResult<T> = Result<T, CoreError>;

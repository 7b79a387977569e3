//! Errors raised by domain values themselves.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// A domain value refused to be built or changed.
///
/// Lookups, duplicates and storage failures are reported by the repositories;
/// this type only covers what a value can decide on its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input, such as an unparseable ISO-8601 duration.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The change would break a rule of the value, such as leaving a final
    /// appointment status.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

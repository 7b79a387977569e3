//! Service-level error model.

use thiserror::Error;

use clinic_auth::AuthError;
use clinic_core::DomainError;
use clinic_infra::{RepositoryError, StoreError};

pub type ClinicResult<T> = Result<T, ClinicError>;

/// Why a service call did not succeed.
///
/// Callers can tell a bad request, a missing record, a clash with stored state
/// and a storage failure apart without inspecting messages.
#[derive(Debug, Error)]
pub enum ClinicError {
    /// Input or a business rule rejected the command.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// The command collides with stored state (duplicate id, username taken, ...).
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Reading or writing the backing store failed.
    #[error("persistence failure: {0}")]
    Persistence(#[source] StoreError),
}

impl ClinicError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

impl From<DomainError> for ClinicError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg)
            | DomainError::InvariantViolation(msg)
            | DomainError::InvalidId(msg) => Self::Validation(msg),
        }
    }
}

impl From<RepositoryError> for ClinicError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Duplicate { kind, key } => {
                Self::Conflict(format!("{kind} {key} already exists"))
            }
            RepositoryError::NotFound { kind, id } => Self::NotFound(format!("{kind} {id}")),
            RepositoryError::Rejected(e) => e.into(),
            RepositoryError::Store(e) => Self::Persistence(e),
        }
    }
}

impl From<StoreError> for ClinicError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

impl From<AuthError> for ClinicError {
    fn from(value: AuthError) -> Self {
        Self::Unauthorized(value.to_string())
    }
}

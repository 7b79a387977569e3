use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use crate::{CredentialDirectory, Principal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("username and password are required")]
    MissingCredentials,

    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Verifies credentials and tracks the single active session.
///
/// Directories are consulted in the order given. Passwords are compared as
/// stored plain text; this matches the persisted data format and is a known
/// weakness, not a property to rely on.
pub struct Authenticator {
    directories: Vec<Arc<dyn CredentialDirectory>>,
    current: RwLock<Option<Principal>>,
}

impl Authenticator {
    pub fn new(directories: Vec<Arc<dyn CredentialDirectory>>) -> Self {
        Self {
            directories,
            current: RwLock::new(None),
        }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Principal, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        // A username match with the wrong password falls through to the next
        // directory.
        let matched = self
            .directories
            .iter()
            .filter_map(|directory| directory.find_credentials(username))
            .find(|credentials| credentials.active && credentials.password == password);

        let Some(credentials) = matched else {
            tracing::debug!(username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let principal = Principal::from(credentials);
        tracing::info!(user_id = %principal.user_id, kind = %principal.kind, "user logged in");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(principal.clone());
        Ok(principal)
    }

    pub fn logout(&self) {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(principal) = previous {
            tracing::info!(user_id = %principal.user_id, "user logged out");
        }
    }

    pub fn current_user(&self) -> Option<Principal> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl core::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Authenticator")
            .field("directories", &self.directories.len())
            .field("current", &self.current_user())
            .finish()
    }
}

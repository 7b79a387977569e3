use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use clinic_core::UserId;

use crate::CredentialDirectory;

/// Checks usernames for uniqueness across every registered directory.
///
/// Doctors and patients live in different repositories, so no single
/// repository can tell whether a username is free.
///
/// Clones share one claim lock. Callers that check a username and then store
/// it hold [`GlobalUsernameValidator::claim`] across both steps.
#[derive(Clone)]
pub struct GlobalUsernameValidator {
    directories: Vec<Arc<dyn CredentialDirectory>>,
    claims: Arc<Mutex<()>>,
}

impl GlobalUsernameValidator {
    pub fn new(directories: Vec<Arc<dyn CredentialDirectory>>) -> Self {
        Self {
            directories,
            claims: Arc::new(Mutex::new(())),
        }
    }

    /// Serialise username claims across every clone of this validator.
    ///
    /// While the guard is alive no other claimant can pass its own check.
    pub fn claim(&self) -> MutexGuard<'_, ()> {
        self.claims.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True if an active account other than `exclude` already uses `username`.
    ///
    /// Pass the account's own id as `exclude` on update so a user can keep its
    /// username.
    pub fn username_exists(&self, username: &str, exclude: Option<UserId>) -> bool {
        let username = username.trim();
        self.directories.iter().any(|directory| {
            directory
                .find_credentials(username)
                .is_some_and(|found| Some(found.user_id) != exclude)
        })
    }
}

impl core::fmt::Debug for GlobalUsernameValidator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlobalUsernameValidator")
            .field("directories", &self.directories.len())
            .finish()
    }
}

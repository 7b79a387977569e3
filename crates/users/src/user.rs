//! Shared user record and the authentication capability.

use serde::{Deserialize, Serialize};

use clinic_core::UserId;

/// Which kind of account a user record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    Doctor,
    Patient,
}

impl core::fmt::Display for UserKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UserKind::Doctor => write!(f, "doctor"),
            UserKind::Patient => write!(f, "patient"),
        }
    }
}

fn default_active() -> bool {
    true
}

/// Fields every user carries, embedded by value in `Doctor` and `Patient`.
///
/// # Invariants
/// - `id` is assigned at construction and never changes (no setter).
/// - `active == false` marks a soft-deleted account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    pub username: String,
    pub phone_number: String,
    pub password: String,
    pub full_name: String,
    pub document_number: String,
    #[serde(default = "default_active")]
    active: bool,
}

impl UserProfile {
    pub fn new(
        username: impl Into<String>,
        phone_number: impl Into<String>,
        password: impl Into<String>,
        full_name: impl Into<String>,
        document_number: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            phone_number: phone_number.into(),
            password: password.into(),
            full_name: full_name.into(),
            document_number: document_number.into(),
            active: true,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Username as compared by lookups (surrounding whitespace ignored).
    pub fn normalized_username(&self) -> &str {
        self.username.trim()
    }

    /// Two profiles describe the same person when username and document match.
    pub fn same_identity(&self, other: &UserProfile) -> bool {
        self.normalized_username() == other.normalized_username()
            && self.document_number.trim() == other.document_number.trim()
    }
}

/// Capability of exposing credentials and an active flag for login purposes.
///
/// Anything implementing this can be looked up by username, regardless of the
/// concrete record type behind it.
pub trait Authenticatable {
    fn profile(&self) -> &UserProfile;

    fn kind(&self) -> UserKind;

    fn user_id(&self) -> UserId {
        *self.profile().id()
    }

    fn username(&self) -> &str {
        self.profile().normalized_username()
    }

    /// Stored password, kept in clear text by the persisted format.
    fn password(&self) -> &str {
        &self.profile().password
    }

    fn full_name(&self) -> &str {
        &self.profile().full_name
    }

    /// Whether the account may log in and hold a username.
    fn account_active(&self) -> bool {
        self.profile().is_active()
    }
}

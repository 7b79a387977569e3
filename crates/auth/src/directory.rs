use std::sync::Arc;

use clinic_core::UserId;
use clinic_users::{Authenticatable, UserKind};

/// Owned snapshot of the login-relevant fields of one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: UserId,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub kind: UserKind,
    pub active: bool,
}

impl Credentials {
    pub fn from_account<A: Authenticatable + ?Sized>(account: &A) -> Self {
        Self {
            user_id: account.user_id(),
            username: account.username().to_string(),
            password: account.password().to_string(),
            full_name: account.full_name().to_string(),
            kind: account.kind(),
            active: account.account_active(),
        }
    }
}

/// A source of accounts that can be looked up by username.
///
/// Implementations only return active accounts and compare the trimmed
/// username case-sensitively.
pub trait CredentialDirectory: Send + Sync {
    fn find_credentials(&self, username: &str) -> Option<Credentials>;
}

impl<D> CredentialDirectory for Arc<D>
where
    D: CredentialDirectory + ?Sized,
{
    fn find_credentials(&self, username: &str) -> Option<Credentials> {
        (**self).find_credentials(username)
    }
}

use clinic_core::UserId;
use clinic_users::UserKind;

use crate::Credentials;

/// The user holding the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
    pub full_name: String,
    pub kind: UserKind,
}

impl From<Credentials> for Principal {
    fn from(value: Credentials) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            full_name: value.full_name,
            kind: value.kind,
        }
    }
}

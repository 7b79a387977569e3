use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use clinic_core::time::iso_date;
use clinic_core::{Entity, SoftDeletable, UserId};

use crate::user::{Authenticatable, UserKind, UserProfile};

/// A patient account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(with = "iso_date")]
    pub birth_date: NaiveDate,
}

impl Patient {
    pub fn new(profile: UserProfile, birth_date: NaiveDate) -> Self {
        Self {
            profile,
            birth_date,
        }
    }
}

impl Entity for Patient {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        self.profile.id()
    }
}

impl SoftDeletable for Patient {
    fn is_active(&self) -> bool {
        self.profile.is_active()
    }

    fn deactivate(&mut self) {
        self.profile.deactivate();
    }
}

impl Authenticatable for Patient {
    fn profile(&self) -> &UserProfile {
        &self.profile
    }

    fn kind(&self) -> UserKind {
        UserKind::Patient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn birth_date_is_a_plain_iso_date() {
        let patient = Patient::new(
            UserProfile::new("lucia", "3001234567", "secret", "Lucia Perez", "1020304050"),
            NaiveDate::from_ymd_opt(1990, 2, 28).unwrap(),
        );

        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["birth_date"], "1990-02-28");

        let back: Patient = serde_json::from_value(json).unwrap();
        assert_eq!(back, patient);
    }
}

use serde::{Deserialize, Serialize};

use clinic_core::{Entity, SoftDeletable, SpecialtyId, UserId};

use crate::specialty::Specialty;
use crate::user::{Authenticatable, UserKind, UserProfile};

/// A doctor account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub specialty: Specialty,
}

impl Doctor {
    pub fn new(profile: UserProfile, specialty: Specialty) -> Self {
        Self { profile, specialty }
    }

    pub fn practises(&self, specialty_id: &SpecialtyId) -> bool {
        self.specialty.id() == specialty_id
    }
}

impl Entity for Doctor {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        self.profile.id()
    }
}

impl SoftDeletable for Doctor {
    fn is_active(&self) -> bool {
        self.profile.is_active()
    }

    fn deactivate(&mut self) {
        self.profile.deactivate();
    }
}

impl Authenticatable for Doctor {
    fn profile(&self) -> &UserProfile {
        &self.profile
    }

    fn kind(&self) -> UserKind {
        UserKind::Doctor
    }
}

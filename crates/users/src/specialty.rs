use serde::{Deserialize, Serialize};

use clinic_core::{Entity, SpecialtyId};

/// Fixed catalogue of medical specialties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialtyName {
    GeneralMedicine,
    Cardiology,
    Dermatology,
    Neurology,
    Pediatrics,
    Gynecology,
    Orthopedics,
    Ophthalmology,
    Psychiatry,
}

impl SpecialtyName {
    pub const ALL: [SpecialtyName; 9] = [
        SpecialtyName::GeneralMedicine,
        SpecialtyName::Cardiology,
        SpecialtyName::Dermatology,
        SpecialtyName::Neurology,
        SpecialtyName::Pediatrics,
        SpecialtyName::Gynecology,
        SpecialtyName::Orthopedics,
        SpecialtyName::Ophthalmology,
        SpecialtyName::Psychiatry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialtyName::GeneralMedicine => "GENERAL_MEDICINE",
            SpecialtyName::Cardiology => "CARDIOLOGY",
            SpecialtyName::Dermatology => "DERMATOLOGY",
            SpecialtyName::Neurology => "NEUROLOGY",
            SpecialtyName::Pediatrics => "PEDIATRICS",
            SpecialtyName::Gynecology => "GYNECOLOGY",
            SpecialtyName::Orthopedics => "ORTHOPEDICS",
            SpecialtyName::Ophthalmology => "OPHTHALMOLOGY",
            SpecialtyName::Psychiatry => "PSYCHIATRY",
        }
    }
}

impl core::fmt::Display for SpecialtyName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A specialty a doctor can practise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    id: SpecialtyId,
    pub name: SpecialtyName,
}

impl Specialty {
    pub fn new(name: SpecialtyName) -> Self {
        Self {
            id: SpecialtyId::new(),
            name,
        }
    }
}

impl Entity for Specialty {
    type Id = SpecialtyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

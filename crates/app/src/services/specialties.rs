use std::sync::Arc;

use clinic_core::{Entity, SpecialtyId};
use clinic_infra::{DoctorRepository, SpecialtyRepository};
use clinic_users::{Specialty, SpecialtyName};

use crate::error::{ClinicError, ClinicResult};

/// Registry of specialties doctors can be assigned to.
pub struct SpecialtyService {
    specialties: Arc<SpecialtyRepository>,
    doctors: Arc<DoctorRepository>,
}

impl SpecialtyService {
    pub fn new(specialties: Arc<SpecialtyRepository>, doctors: Arc<DoctorRepository>) -> Self {
        Self {
            specialties,
            doctors,
        }
    }

    /// Register a specialty. Each name may be registered once.
    pub fn register(&self, name: SpecialtyName) -> ClinicResult<Specialty> {
        if self.specialties.search_by_name(name).is_some() {
            return Err(ClinicError::conflict(format!("specialty {name} is already registered")));
        }
        let specialty = Specialty::new(name);
        self.specialties.add(specialty.clone())?;
        tracing::info!(specialty_id = %specialty.id(), %name, "specialty registered");
        Ok(specialty)
    }

    /// Rename a specialty and refresh the copy embedded in every doctor
    /// practising it.
    pub fn rename(&self, id: &SpecialtyId, name: SpecialtyName) -> ClinicResult<Specialty> {
        let mut specialty = self
            .specialties
            .search_by_id(id)
            .ok_or_else(|| ClinicError::not_found(format!("specialty {id}")))?;
        if self
            .specialties
            .search_by_name(name)
            .is_some_and(|other| other.id() != id)
        {
            return Err(ClinicError::conflict(format!("specialty {name} is already registered")));
        }

        specialty.name = name;
        self.specialties.update(specialty.clone())?;

        for mut doctor in self
            .doctors
            .list_including_inactive()
            .into_iter()
            .filter(|d| d.practises(id))
        {
            doctor.specialty = specialty.clone();
            self.doctors.update(doctor)?;
        }

        tracing::info!(specialty_id = %id, %name, "specialty renamed");
        Ok(specialty)
    }

    pub fn find(&self, id: &SpecialtyId) -> Option<Specialty> {
        self.specialties.search_by_id(id)
    }

    pub fn list_all(&self) -> Vec<Specialty> {
        self.specialties.list_all()
    }
}

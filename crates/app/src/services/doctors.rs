use std::sync::Arc;

use clinic_auth::GlobalUsernameValidator;
use clinic_core::{Entity, SpecialtyId, UserId};
use clinic_infra::{DoctorRepository, SpecialtyRepository};
use clinic_users::{Doctor, Specialty};

use super::{Intent, check_account};
use crate::error::{ClinicError, ClinicResult};

pub struct DoctorService {
    doctors: Arc<DoctorRepository>,
    specialties: Arc<SpecialtyRepository>,
    validator: GlobalUsernameValidator,
}

impl DoctorService {
    pub fn new(
        doctors: Arc<DoctorRepository>,
        specialties: Arc<SpecialtyRepository>,
        validator: GlobalUsernameValidator,
    ) -> Self {
        Self {
            doctors,
            specialties,
            validator,
        }
    }

    /// Register a new doctor. The embedded specialty must be a registered one
    /// and is refreshed from the specialty registry.
    pub fn register(&self, mut doctor: Doctor) -> ClinicResult<()> {
        let _claim = self.validator.claim();
        self.validate(&mut doctor, Intent::Create)?;
        let id = *doctor.profile.id();
        self.doctors.add(doctor)?;
        tracing::info!(doctor_id = %id, "doctor registered");
        Ok(())
    }

    pub fn update(&self, mut doctor: Doctor) -> ClinicResult<()> {
        let _claim = self.validator.claim();
        self.validate(&mut doctor, Intent::Update)?;
        let id = *doctor.profile.id();
        self.doctors.update(doctor)?;
        tracing::info!(doctor_id = %id, "doctor updated");
        Ok(())
    }

    /// Soft delete: the doctor stays retrievable by id.
    pub fn remove(&self, id: &UserId) -> ClinicResult<()> {
        self.doctors.delete_by_id(id)?;
        tracing::info!(doctor_id = %id, "doctor deactivated");
        Ok(())
    }

    pub fn find(&self, id: &UserId) -> Option<Doctor> {
        self.doctors.search_by_id(id)
    }

    /// Active doctors.
    pub fn list_all(&self) -> Vec<Doctor> {
        self.doctors.list_all()
    }

    pub fn assign_specialty(
        &self,
        id: &UserId,
        specialty_id: &SpecialtyId,
    ) -> ClinicResult<Doctor> {
        let specialty = self.registered_specialty(specialty_id)?;
        let mut doctor = self
            .doctors
            .search_by_id(id)
            .ok_or_else(|| ClinicError::not_found(format!("doctor {id}")))?;

        doctor.specialty = specialty;
        self.doctors.update(doctor.clone())?;
        tracing::info!(doctor_id = %id, specialty_id = %specialty_id, "specialty assigned");
        Ok(doctor)
    }

    /// Active doctors practising the specialty.
    pub fn by_specialty(&self, specialty_id: &SpecialtyId) -> Vec<Doctor> {
        self.doctors.search_by_specialty(specialty_id)
    }

    fn registered_specialty(&self, id: &SpecialtyId) -> ClinicResult<Specialty> {
        self.specialties
            .search_by_id(id)
            .ok_or_else(|| ClinicError::validation(format!("specialty {id} is not registered")))
    }

    fn validate(&self, doctor: &mut Doctor, intent: Intent) -> ClinicResult<()> {
        let result = self
            .registered_specialty(doctor.specialty.id())
            .and_then(|specialty| {
                doctor.specialty = specialty;
                check_account(&self.doctors, &self.validator, doctor, intent)
            });
        if let Err(e) = &result {
            tracing::debug!(doctor_id = %doctor.profile.id(), error = %e, "doctor rejected");
        }
        result
    }
}

use std::sync::{Arc, LazyLock};

use regex::Regex;

use clinic_auth::GlobalUsernameValidator;
use clinic_core::{Clock, UserId};
use clinic_infra::PatientRepository;
use clinic_users::Patient;

use super::{Intent, check_account};
use crate::error::{ClinicError, ClinicResult};

/// Usernames patients may not take.
const RESERVED_USERNAMES: &[&str] = &["admin"];

/// Colombian mobile number, optionally prefixed with the country code.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+57|57)?3\d{9}$").expect("phone pattern is valid"));

static DOCUMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("document pattern is valid"));

pub struct PatientService {
    patients: Arc<PatientRepository>,
    validator: GlobalUsernameValidator,
    clock: Arc<dyn Clock>,
}

impl PatientService {
    pub fn new(
        patients: Arc<PatientRepository>,
        validator: GlobalUsernameValidator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            patients,
            validator,
            clock,
        }
    }

    pub fn add(&self, patient: Patient) -> ClinicResult<()> {
        let _claim = self.validator.claim();
        self.validate(&patient, Intent::Create)?;
        let id = *patient.profile.id();
        self.patients.add(patient)?;
        tracing::info!(patient_id = %id, "patient added");
        Ok(())
    }

    pub fn update(&self, patient: Patient) -> ClinicResult<()> {
        let _claim = self.validator.claim();
        self.validate(&patient, Intent::Update)?;
        let id = *patient.profile.id();
        self.patients.update(patient)?;
        tracing::info!(patient_id = %id, "patient updated");
        Ok(())
    }

    /// Soft delete: the patient stays retrievable by id.
    pub fn remove(&self, id: &UserId) -> ClinicResult<()> {
        self.patients.delete_by_id(id)?;
        tracing::info!(patient_id = %id, "patient deactivated");
        Ok(())
    }

    pub fn find(&self, id: &UserId) -> Option<Patient> {
        self.patients.search_by_id(id)
    }

    /// Active patients.
    pub fn list_all(&self) -> Vec<Patient> {
        self.patients.list_all()
    }

    fn validate(&self, patient: &Patient, intent: Intent) -> ClinicResult<()> {
        let result = self.check_fields(patient).and_then(|()| {
            check_account(&self.patients, &self.validator, patient, intent)
        });
        if let Err(e) = &result {
            tracing::debug!(patient_id = %patient.profile.id(), error = %e, "patient rejected");
        }
        result
    }

    fn check_fields(&self, patient: &Patient) -> ClinicResult<()> {
        let profile = &patient.profile;

        if RESERVED_USERNAMES.contains(&profile.normalized_username()) {
            return Err(ClinicError::validation("username is reserved"));
        }
        if !PHONE_PATTERN.is_match(profile.phone_number.trim()) {
            return Err(ClinicError::validation("phone number is not a valid mobile number"));
        }
        if !DOCUMENT_PATTERN.is_match(profile.document_number.trim()) {
            return Err(ClinicError::validation("document number must contain digits only"));
        }
        if patient.birth_date > self.clock.today() {
            return Err(ClinicError::validation("birth date is in the future"));
        }
        Ok(())
    }
}

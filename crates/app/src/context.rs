//! Wiring of repositories, session and services for one running clinic.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use clinic_auth::{Authenticator, CredentialDirectory, GlobalUsernameValidator};
use clinic_core::{Clock, SystemClock};
use clinic_infra::{
    AppointmentRepository, CollectionStore, ConsultationRepository, DoctorRepository,
    InMemoryCollectionStore, JsonCollectionStore, PatientRepository, SpecialtyRepository,
};
use clinic_scheduling::{Appointment, Consultation};
use clinic_users::{Doctor, Patient, Specialty};

use crate::config::{
    APPOINTMENTS_FILE, CONSULTATIONS_FILE, ClinicConfig, DOCTORS_FILE, PATIENTS_FILE,
    SPECIALTIES_FILE, StorageBackend,
};
use crate::error::ClinicResult;
use crate::services::{
    AppointmentService, ConsultationService, DoctorService, PatientService, SpecialtyService,
};

/// Record counts per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectionSummary {
    pub doctors: usize,
    pub patients: usize,
    pub appointments: usize,
    pub consultations: usize,
    pub specialties: usize,
}

/// Everything a caller needs, built once at startup and passed by reference.
///
/// There is one session per context.
pub struct ClinicContext {
    pub doctor_repository: Arc<DoctorRepository>,
    pub patient_repository: Arc<PatientRepository>,
    pub appointment_repository: Arc<AppointmentRepository>,
    pub consultation_repository: Arc<ConsultationRepository>,
    pub specialty_repository: Arc<SpecialtyRepository>,

    pub usernames: GlobalUsernameValidator,
    pub auth: Authenticator,

    pub appointments: AppointmentService,
    pub consultations: ConsultationService,
    pub doctors: DoctorService,
    pub patients: PatientService,
    pub specialties: SpecialtyService,
}

fn collection_store<T>(config: &ClinicConfig, file: &str) -> Arc<dyn CollectionStore<T>>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    match config.storage {
        StorageBackend::Json => Arc::new(JsonCollectionStore::new(config.data_dir.join(file))),
        StorageBackend::Memory => Arc::new(InMemoryCollectionStore::new()),
    }
}

impl ClinicContext {
    pub fn open(config: &ClinicConfig) -> ClinicResult<Self> {
        Self::open_with_clock(config, Arc::new(SystemClock))
    }

    /// Open with an explicit clock (used to pin "now" in tests).
    pub fn open_with_clock(config: &ClinicConfig, clock: Arc<dyn Clock>) -> ClinicResult<Self> {
        let doctor_repository = Arc::new(DoctorRepository::open(
            collection_store::<Doctor>(config, DOCTORS_FILE),
        )?);
        let patient_repository = Arc::new(PatientRepository::open(
            collection_store::<Patient>(config, PATIENTS_FILE),
        )?);
        let appointment_repository = Arc::new(AppointmentRepository::open(
            collection_store::<Appointment>(config, APPOINTMENTS_FILE),
        )?);
        let consultation_repository = Arc::new(ConsultationRepository::open(
            collection_store::<Consultation>(config, CONSULTATIONS_FILE),
        )?);
        let specialty_repository = Arc::new(SpecialtyRepository::open(
            collection_store::<Specialty>(config, SPECIALTIES_FILE),
        )?);

        // Login order: patients first, then doctors.
        let directories: Vec<Arc<dyn CredentialDirectory>> = vec![
            patient_repository.clone() as Arc<dyn CredentialDirectory>,
            doctor_repository.clone() as Arc<dyn CredentialDirectory>,
        ];
        let usernames = GlobalUsernameValidator::new(directories.clone());
        let auth = Authenticator::new(directories);

        let appointments = AppointmentService::new(
            appointment_repository.clone(),
            patient_repository.clone(),
            doctor_repository.clone(),
            clock.clone(),
            config.transition_policy,
        );
        let consultations = ConsultationService::new(
            consultation_repository.clone(),
            appointment_repository.clone(),
            clock.clone(),
        );
        let doctors = DoctorService::new(
            doctor_repository.clone(),
            specialty_repository.clone(),
            usernames.clone(),
        );
        let patients = PatientService::new(patient_repository.clone(), usernames.clone(), clock);
        let specialties =
            SpecialtyService::new(specialty_repository.clone(), doctor_repository.clone());

        tracing::info!(
            storage = ?config.storage,
            data_dir = %config.data_dir.display(),
            policy = ?config.transition_policy,
            "clinic context opened"
        );

        Ok(Self {
            doctor_repository,
            patient_repository,
            appointment_repository,
            consultation_repository,
            specialty_repository,
            usernames,
            auth,
            appointments,
            consultations,
            doctors,
            patients,
            specialties,
        })
    }

    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary {
            doctors: self.doctor_repository.len(),
            patients: self.patient_repository.len(),
            appointments: self.appointment_repository.len(),
            consultations: self.consultation_repository.len(),
            specialties: self.specialty_repository.len(),
        }
    }

    /// Re-read every collection from storage.
    pub fn reload(&self) -> ClinicResult<()> {
        self.doctor_repository.reload()?;
        self.patient_repository.reload()?;
        self.appointment_repository.reload()?;
        self.consultation_repository.reload()?;
        self.specialty_repository.reload()?;
        Ok(())
    }
}

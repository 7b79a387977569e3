//! Infrastructure layer: JSON file storage and the repositories built on it.

pub mod repository;
pub mod store;

pub use repository::{
    AccountRepository, AppointmentRepository, ConsultationRepository, DoctorRepository,
    PatientRepository, Record, Repository, RepositoryError, RepositoryResult,
    SpecialtyRepository,
};
pub use store::{
    CollectionStore, InMemoryCollectionStore, JsonCollectionStore, JsonStore, StoreError,
};

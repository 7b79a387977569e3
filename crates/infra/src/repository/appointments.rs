use clinic_core::{AppointmentId, UserId};
use clinic_scheduling::{Appointment, AppointmentStatus, TransitionPolicy};

use super::{Record, Repository, RepositoryResult};
use crate::store::CollectionStore;

impl Record for Appointment {
    const KIND: &'static str = "appointment";
}

#[derive(Debug)]
pub struct AppointmentRepository {
    inner: Repository<Appointment>,
}

impl AppointmentRepository {
    pub fn open(store: impl CollectionStore<Appointment> + 'static) -> RepositoryResult<Self> {
        Ok(Self {
            inner: Repository::open(store)?,
        })
    }

    pub fn add(&self, appointment: Appointment) -> RepositoryResult<()> {
        self.inner.insert(appointment)
    }

    pub fn update(&self, appointment: Appointment) -> RepositoryResult<()> {
        self.inner.replace(appointment)
    }

    /// Change the status of a stored appointment, subject to `policy`.
    pub fn update_status(
        &self,
        id: &AppointmentId,
        status: AppointmentStatus,
        policy: TransitionPolicy,
    ) -> RepositoryResult<Appointment> {
        self.inner.try_modify(id, |appointment| {
            appointment.transition_to(status, policy)?;
            Ok(appointment.clone())
        })
    }

    pub fn search_by_id(&self, id: &AppointmentId) -> Option<Appointment> {
        self.inner.find_by_id(id)
    }

    pub fn contains(&self, id: &AppointmentId) -> bool {
        self.inner.contains(id)
    }

    pub fn search_by_patient(&self, patient_id: &UserId) -> Vec<Appointment> {
        self.inner.filter(|a| a.patient_id == *patient_id)
    }

    pub fn search_by_doctor(&self, doctor_id: &UserId) -> Vec<Appointment> {
        self.inner.filter(|a| a.doctor_id == *doctor_id)
    }

    /// Appointments matching an arbitrary predicate.
    pub fn search(&self, predicate: impl Fn(&Appointment) -> bool) -> Vec<Appointment> {
        self.inner.filter(predicate)
    }

    pub fn list_all(&self) -> Vec<Appointment> {
        self.inner.get_all()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&self) -> RepositoryResult<()> {
        self.inner.clear()
    }

    pub fn reload(&self) -> RepositoryResult<()> {
        self.inner.reload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryError;
    use crate::store::JsonCollectionStore;
    use chrono::{Duration, NaiveDate};
    use clinic_core::{DomainError, Entity};

    fn appointment(patient: UserId, doctor: UserId) -> Appointment {
        let at = NaiveDate::from_ymd_opt(2032, 3, 4)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        Appointment::new(at, Duration::minutes(30), patient, doctor)
    }

    #[test]
    fn queries_filter_by_participant() {
        let dir = tempfile::tempdir().unwrap();
        let repo =
            AppointmentRepository::open(JsonCollectionStore::new(dir.path().join("a.json")))
                .unwrap();
        let (p1, p2, d) = (UserId::new(), UserId::new(), UserId::new());
        let first = appointment(p1, d);
        repo.add(first.clone()).unwrap();
        repo.add(appointment(p2, d)).unwrap();

        assert_eq!(repo.search_by_patient(&p1), vec![first]);
        assert_eq!(repo.search_by_doctor(&d).len(), 2);
        assert!(repo.search_by_doctor(&p1).is_empty());
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repo =
            AppointmentRepository::open(JsonCollectionStore::new(dir.path().join("a.json")))
                .unwrap();
        let a = appointment(UserId::new(), UserId::new());
        repo.add(a.clone()).unwrap();

        assert!(matches!(repo.add(a), Err(RepositoryError::Duplicate { .. })));
    }

    #[test]
    fn status_update_persists_and_respects_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.json");
        let repo = AppointmentRepository::open(JsonCollectionStore::new(&path)).unwrap();
        let a = appointment(UserId::new(), UserId::new());
        let id = *a.id();
        repo.add(a).unwrap();

        let updated = repo
            .update_status(&id, AppointmentStatus::Completed, TransitionPolicy::Strict)
            .unwrap();
        assert_eq!(updated.status(), AppointmentStatus::Completed);

        let err = repo
            .update_status(&id, AppointmentStatus::Scheduled, TransitionPolicy::Strict)
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Rejected(DomainError::InvariantViolation(_))
        ));

        let reopened = AppointmentRepository::open(JsonCollectionStore::new(&path)).unwrap();
        assert_eq!(
            reopened.search_by_id(&id).unwrap().status(),
            AppointmentStatus::Completed
        );
    }
}

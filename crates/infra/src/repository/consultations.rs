use clinic_core::{AppointmentId, ConsultationId, Entity, UserId};
use clinic_scheduling::Consultation;

use super::{Record, Repository, RepositoryResult};
use crate::store::CollectionStore;

impl Record for Consultation {
    const KIND: &'static str = "consultation";

    // One consultation per appointment.
    fn conflicts_with(&self, other: &Self) -> bool {
        self.id() == other.id() || self.appointment_id() == other.appointment_id()
    }
}

#[derive(Debug)]
pub struct ConsultationRepository {
    inner: Repository<Consultation>,
}

impl ConsultationRepository {
    pub fn open(store: impl CollectionStore<Consultation> + 'static) -> RepositoryResult<Self> {
        Ok(Self {
            inner: Repository::open(store)?,
        })
    }

    /// Store a consultation. Fails if its id, or its appointment, is taken.
    pub fn add(&self, consultation: Consultation) -> RepositoryResult<()> {
        self.inner.insert(consultation)
    }

    pub fn update(&self, consultation: Consultation) -> RepositoryResult<()> {
        self.inner.replace(consultation)
    }

    pub fn search_by_id(&self, id: &ConsultationId) -> Option<Consultation> {
        self.inner.find_by_id(id)
    }

    pub fn search_by_appointment(&self, appointment_id: &AppointmentId) -> Option<Consultation> {
        self.inner.find(|c| c.appointment_id() == appointment_id)
    }

    /// Consultations for a patient, in the order they were stored.
    pub fn search_by_patient(&self, patient_id: &UserId) -> Vec<Consultation> {
        self.inner.filter(|c| c.patient_id() == patient_id)
    }

    pub fn search_by_doctor(&self, doctor_id: &UserId) -> Vec<Consultation> {
        self.inner.filter(|c| c.doctor_id() == doctor_id)
    }

    pub fn list_all(&self) -> Vec<Consultation> {
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
    use crate::store::InMemoryCollectionStore;
    use chrono::{Duration, NaiveDate};
    use clinic_scheduling::Appointment;

    #[test]
    fn second_consultation_for_an_appointment_is_rejected() {
        let repo = ConsultationRepository::open(InMemoryCollectionStore::new()).unwrap();
        let at = NaiveDate::from_ymd_opt(2030, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let appointment =
            Appointment::new(at, Duration::minutes(15), UserId::new(), UserId::new());

        let first = Consultation::for_appointment(&appointment, "Migraine", "Rest", at);
        repo.add(first.clone()).unwrap();
        let second = Consultation::for_appointment(&appointment, "Other", "Other", at);

        assert!(matches!(repo.add(second), Err(RepositoryError::Duplicate { .. })));
        assert_eq!(repo.search_by_appointment(appointment.id()), Some(first.clone()));
        assert_eq!(repo.search_by_patient(&appointment.patient_id), vec![first.clone()]);
        assert_eq!(repo.search_by_doctor(&appointment.doctor_id), vec![first]);
    }
}

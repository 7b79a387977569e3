use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use clinic_core::{AppointmentId, Clock, Entity, SoftDeletable, UserId};
use clinic_infra::{AppointmentRepository, DoctorRepository, PatientRepository};
use clinic_scheduling::{Appointment, AppointmentStatus, TransitionPolicy};

use crate::error::{ClinicError, ClinicResult};

pub struct AppointmentService {
    appointments: Arc<AppointmentRepository>,
    patients: Arc<PatientRepository>,
    doctors: Arc<DoctorRepository>,
    clock: Arc<dyn Clock>,
    policy: TransitionPolicy,
}

impl AppointmentService {
    pub fn new(
        appointments: Arc<AppointmentRepository>,
        patients: Arc<PatientRepository>,
        doctors: Arc<DoctorRepository>,
        clock: Arc<dyn Clock>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            appointments,
            patients,
            doctors,
            clock,
            policy,
        }
    }

    /// Book an appointment.
    ///
    /// Rejected when the duration is not positive, the time is in the past,
    /// the patient or doctor is unknown or inactive, or the id is taken.
    pub fn schedule(&self, appointment: Appointment) -> ClinicResult<()> {
        if let Err(e) = self.check_schedule(&appointment) {
            tracing::debug!(appointment_id = %appointment.id(), error = %e, "appointment rejected");
            return Err(e);
        }
        let id = *appointment.id();
        let at = appointment.scheduled_at;
        self.appointments.add(appointment)?;
        tracing::info!(appointment_id = %id, scheduled_at = %at, "appointment scheduled");
        Ok(())
    }

    fn check_schedule(&self, appointment: &Appointment) -> ClinicResult<()> {
        if appointment.duration <= Duration::zero() {
            return Err(ClinicError::validation("duration must be positive"));
        }
        if appointment.scheduled_at < self.clock.now() {
            return Err(ClinicError::validation("appointment time is in the past"));
        }

        let patient = self
            .patients
            .search_by_id(&appointment.patient_id)
            .ok_or_else(|| ClinicError::not_found(format!("patient {}", appointment.patient_id)))?;
        if !patient.is_active() {
            return Err(ClinicError::validation("patient is inactive"));
        }
        let doctor = self
            .doctors
            .search_by_id(&appointment.doctor_id)
            .ok_or_else(|| ClinicError::not_found(format!("doctor {}", appointment.doctor_id)))?;
        if !doctor.is_active() {
            return Err(ClinicError::validation("doctor is inactive"));
        }

        if self.appointments.contains(appointment.id()) {
            return Err(ClinicError::conflict(format!(
                "appointment {} already exists",
                appointment.id()
            )));
        }
        Ok(())
    }

    /// Move an appointment to `status`, subject to the configured transition policy.
    pub fn update_status(
        &self,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> ClinicResult<Appointment> {
        let updated = self.appointments.update_status(id, status, self.policy)?;
        tracing::info!(appointment_id = %id, %status, "appointment status changed");
        Ok(updated)
    }

    pub fn find(&self, id: &AppointmentId) -> Option<Appointment> {
        self.appointments.search_by_id(id)
    }

    pub fn list_all(&self) -> Vec<Appointment> {
        self.appointments.list_all()
    }

    /// A doctor's appointments, optionally only those with `status`.
    pub fn by_doctor(
        &self,
        doctor_id: &UserId,
        status: Option<AppointmentStatus>,
    ) -> Vec<Appointment> {
        with_status(self.appointments.search_by_doctor(doctor_id), status)
    }

    pub fn by_patient(
        &self,
        patient_id: &UserId,
        status: Option<AppointmentStatus>,
    ) -> Vec<Appointment> {
        with_status(self.appointments.search_by_patient(patient_id), status)
    }

    /// Appointments starting on the given calendar day, earliest first.
    pub fn scheduled_on(&self, date: NaiveDate) -> Vec<Appointment> {
        let mut found = self.appointments.search(|a| a.scheduled_at.date() == date);
        found.sort_by_key(|a| a.scheduled_at);
        found
    }
}

fn with_status(
    appointments: Vec<Appointment>,
    status: Option<AppointmentStatus>,
) -> Vec<Appointment> {
    match status {
        Some(status) => appointments
            .into_iter()
            .filter(|a| a.status() == status)
            .collect(),
        None => appointments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::FixedClock;
    use clinic_infra::InMemoryCollectionStore;
    use clinic_users::{Doctor, Patient, Specialty, SpecialtyName, UserProfile};

    struct Fixture {
        service: AppointmentService,
        patient: UserId,
        doctor: UserId,
        now: chrono::NaiveDateTime,
    }

    fn fixture(policy: TransitionPolicy) -> Fixture {
        let now = NaiveDate::from_ymd_opt(2030, 5, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let patients = Arc::new(PatientRepository::open(InMemoryCollectionStore::new()).unwrap());
        let doctors = Arc::new(DoctorRepository::open(InMemoryCollectionStore::new()).unwrap());
        let patient = Patient::new(
            UserProfile::new("p", "3001234567", "pw", "Pat", "1"),
            NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
        );
        let doctor = Doctor::new(
            UserProfile::new("d", "3001234567", "pw", "Doc", "2"),
            Specialty::new(SpecialtyName::GeneralMedicine),
        );
        let (patient_id, doctor_id) = (*patient.profile.id(), *doctor.profile.id());
        patients.add(patient).unwrap();
        doctors.add(doctor).unwrap();

        let service = AppointmentService::new(
            Arc::new(AppointmentRepository::open(InMemoryCollectionStore::new()).unwrap()),
            patients,
            doctors,
            Arc::new(FixedClock(now)),
            policy,
        );
        Fixture {
            service,
            patient: patient_id,
            doctor: doctor_id,
            now,
        }
    }

    fn at(fx: &Fixture, hours_from_now: i64) -> Appointment {
        Appointment::new(
            fx.now + Duration::hours(hours_from_now),
            Duration::minutes(30),
            fx.patient,
            fx.doctor,
        )
    }

    #[test]
    fn rejects_non_positive_duration() {
        let fx = fixture(TransitionPolicy::Permissive);
        let mut a = at(&fx, 1);
        a.duration = Duration::zero();
        assert!(matches!(fx.service.schedule(a), Err(ClinicError::Validation(_))));
    }

    #[test]
    fn rejects_unknown_participants() {
        let fx = fixture(TransitionPolicy::Permissive);
        let mut a = at(&fx, 1);
        a.doctor_id = UserId::new();
        assert!(matches!(fx.service.schedule(a), Err(ClinicError::NotFound(_))));
    }

    #[test]
    fn filters_by_status_and_day() {
        let fx = fixture(TransitionPolicy::Permissive);
        let later = at(&fx, 3);
        let sooner = at(&fx, 1);
        let next_day = at(&fx, 30);
        for a in [later.clone(), sooner.clone(), next_day] {
            fx.service.schedule(a).unwrap();
        }
        fx.service
            .update_status(later.id(), AppointmentStatus::Cancelled)
            .unwrap();

        let cancelled = fx
            .service
            .by_doctor(&fx.doctor, Some(AppointmentStatus::Cancelled));
        assert_eq!(cancelled.len(), 1);
        assert_eq!(fx.service.by_patient(&fx.patient, None).len(), 3);

        let today: Vec<_> = fx
            .service
            .scheduled_on(fx.now.date())
            .into_iter()
            .map(|a| *a.id())
            .collect();
        assert_eq!(today, vec![*sooner.id(), *later.id()]);
    }

    #[test]
    fn strict_policy_refuses_reopening() {
        let fx = fixture(TransitionPolicy::Strict);
        let a = at(&fx, 1);
        let id = *a.id();
        fx.service.schedule(a).unwrap();
        fx.service
            .update_status(&id, AppointmentStatus::Completed)
            .unwrap();

        let err = fx
            .service
            .update_status(&id, AppointmentStatus::Scheduled)
            .unwrap_err();
        assert!(matches!(err, ClinicError::Validation(_)));
    }

    #[test]
    fn unknown_appointment_status_update_is_not_found() {
        let fx = fixture(TransitionPolicy::Permissive);
        let err = fx
            .service
            .update_status(&AppointmentId::new(), AppointmentStatus::Completed)
            .unwrap_err();
        assert!(matches!(err, ClinicError::NotFound(_)));
    }
}

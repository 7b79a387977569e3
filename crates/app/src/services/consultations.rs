use std::sync::Arc;

use clinic_core::{AppointmentId, Clock, ConsultationId, Entity, UserId};
use clinic_infra::{AppointmentRepository, ConsultationRepository};
use clinic_scheduling::Consultation;

use super::require_text;
use crate::error::{ClinicError, ClinicResult};

pub struct ConsultationService {
    consultations: Arc<ConsultationRepository>,
    appointments: Arc<AppointmentRepository>,
    clock: Arc<dyn Clock>,
}

impl ConsultationService {
    pub fn new(
        consultations: Arc<ConsultationRepository>,
        appointments: Arc<AppointmentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            consultations,
            appointments,
            clock,
        }
    }

    /// Record the consultation for an appointment.
    ///
    /// An appointment has at most one consultation; a second attempt is a
    /// conflict.
    pub fn create(
        &self,
        appointment_id: &AppointmentId,
        diagnosis: &str,
        treatment: &str,
    ) -> ClinicResult<Consultation> {
        let result = self.build(appointment_id, diagnosis, treatment);
        let consultation = match result {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(%appointment_id, error = %e, "consultation rejected");
                return Err(e);
            }
        };

        self.consultations.add(consultation.clone())?;
        tracing::info!(
            consultation_id = %consultation.id(),
            %appointment_id,
            "consultation recorded"
        );
        Ok(consultation)
    }

    fn build(
        &self,
        appointment_id: &AppointmentId,
        diagnosis: &str,
        treatment: &str,
    ) -> ClinicResult<Consultation> {
        require_text(diagnosis, "diagnosis")?;
        require_text(treatment, "treatment")?;

        let appointment = self
            .appointments
            .search_by_id(appointment_id)
            .ok_or_else(|| ClinicError::not_found(format!("appointment {appointment_id}")))?;
        if self
            .consultations
            .search_by_appointment(appointment_id)
            .is_some()
        {
            return Err(ClinicError::conflict(format!(
                "appointment {appointment_id} already has a consultation"
            )));
        }

        Ok(Consultation::for_appointment(
            &appointment,
            diagnosis.trim(),
            treatment.trim(),
            self.clock.now(),
        ))
    }

    pub fn find(&self, id: &ConsultationId) -> Option<Consultation> {
        self.consultations.search_by_id(id)
    }

    pub fn find_by_appointment(&self, appointment_id: &AppointmentId) -> Option<Consultation> {
        self.consultations.search_by_appointment(appointment_id)
    }

    /// A patient's consultations, most recent first.
    pub fn history_for_patient(&self, patient_id: &UserId) -> Vec<Consultation> {
        let mut history = self.consultations.search_by_patient(patient_id);
        history.reverse();
        history
    }

    pub fn by_doctor(&self, doctor_id: &UserId) -> Vec<Consultation> {
        self.consultations.search_by_doctor(doctor_id)
    }

    pub fn list_all(&self) -> Vec<Consultation> {
        self.consultations.list_all()
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use clinic_core::time::iso_datetime;
use clinic_core::{AppointmentId, ConsultationId, Entity, UserId};

use crate::appointment::Appointment;

/// Clinical notes recorded for exactly one appointment.
///
/// Patient and doctor ids are copied from the appointment when the consultation
/// is created, so history queries do not need to consult the appointment book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    id: ConsultationId,
    appointment_id: AppointmentId,
    patient_id: UserId,
    doctor_id: UserId,
    pub diagnosis: String,
    pub treatment: String,
    #[serde(with = "iso_datetime")]
    registered_at: NaiveDateTime,
}

impl Consultation {
    pub fn for_appointment(
        appointment: &Appointment,
        diagnosis: impl Into<String>,
        treatment: impl Into<String>,
        registered_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: ConsultationId::new(),
            appointment_id: *appointment.id(),
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            diagnosis: diagnosis.into(),
            treatment: treatment.into(),
            registered_at,
        }
    }

    pub fn appointment_id(&self) -> &AppointmentId {
        &self.appointment_id
    }

    pub fn patient_id(&self) -> &UserId {
        &self.patient_id
    }

    pub fn doctor_id(&self) -> &UserId {
        &self.doctor_id
    }

    /// When the consultation was recorded (fixed at creation).
    pub fn registered_at(&self) -> NaiveDateTime {
        self.registered_at
    }
}

impl Entity for Consultation {
    type Id = ConsultationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn copies_participants_from_appointment() {
        let at = NaiveDate::from_ymd_opt(2031, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let appointment = Appointment::new(at, Duration::minutes(20), UserId::new(), UserId::new());

        let consultation =
            Consultation::for_appointment(&appointment, "Flu", "Rest and fluids", at);

        assert_eq!(consultation.appointment_id(), appointment.id());
        assert_eq!(*consultation.patient_id(), appointment.patient_id);
        assert_eq!(*consultation.doctor_id(), appointment.doctor_id);
        assert_eq!(consultation.registered_at(), at);
    }
}

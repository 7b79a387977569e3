use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use clinic_core::time::{iso_datetime, iso_duration};
use clinic_core::{AppointmentId, DomainError, DomainResult, Entity, UserId};

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl core::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "SCHEDULED"),
            AppointmentStatus::Completed => write!(f, "COMPLETED"),
            AppointmentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Which status changes are legal.
///
/// `Permissive` allows any change, including `COMPLETED → SCHEDULED`.
/// `Strict` only lets a scheduled appointment be completed or cancelled, after
/// which the status is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    pub fn allows(self, from: AppointmentStatus, to: AppointmentStatus) -> bool {
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => matches!(
                (from, to),
                (
                    AppointmentStatus::Scheduled,
                    AppointmentStatus::Completed | AppointmentStatus::Cancelled
                )
            ),
        }
    }

    pub fn check(self, from: AppointmentStatus, to: AppointmentStatus) -> DomainResult<()> {
        if self.allows(from, to) {
            Ok(())
        } else {
            Err(DomainError::invariant(format!(
                "appointment status cannot change from {from} to {to}"
            )))
        }
    }
}

/// A patient's appointment with a doctor.
///
/// # Invariants
/// - `id` never changes once assigned.
/// - `status` only changes through [`Appointment::transition_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    id: AppointmentId,
    #[serde(with = "iso_datetime")]
    pub scheduled_at: NaiveDateTime,
    #[serde(with = "iso_duration")]
    pub duration: Duration,
    pub patient_id: UserId,
    pub doctor_id: UserId,
    #[serde(default)]
    status: AppointmentStatus,
}

impl Appointment {
    pub fn new(
        scheduled_at: NaiveDateTime,
        duration: Duration,
        patient_id: UserId,
        doctor_id: UserId,
    ) -> Self {
        Self {
            id: AppointmentId::new(),
            scheduled_at,
            duration,
            patient_id,
            doctor_id,
            status: AppointmentStatus::Scheduled,
        }
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.scheduled_at + self.duration
    }

    pub fn transition_to(
        &mut self,
        status: AppointmentStatus,
        policy: TransitionPolicy,
    ) -> DomainResult<()> {
        policy.check(self.status, status)?;
        self.status = status;
        Ok(())
    }
}

impl Entity for Appointment {
    type Id = AppointmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

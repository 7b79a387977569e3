//! Scheduling domain: appointments between a patient and a doctor, and the
//! consultation recorded for an appointment once it takes place.
//!
//! Records refer to each other by id only. Whether those ids resolve is checked
//! by the services that create the records, not here.

pub mod appointment;
pub mod consultation;

pub use appointment::{Appointment, AppointmentStatus, TransitionPolicy};
pub use consultation::Consultation;

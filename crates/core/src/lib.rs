//! `clinic-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no IO): identifiers,
//! the entity traits shared by every record type, the domain error model and the
//! ISO-8601 codecs used when records are persisted.

pub mod entity;
pub mod error;
pub mod id;
pub mod time;

pub use entity::{Entity, SoftDeletable};
pub use error::{DomainError, DomainResult};
pub use id::{AppointmentId, ConsultationId, SpecialtyId, UserId};
pub use time::{Clock, FixedClock, SystemClock};

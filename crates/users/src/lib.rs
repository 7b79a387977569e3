//! User-like records of the clinic: doctors, patients and the specialties doctors practise.
//!
//! There is no inheritance here. Both `Doctor` and `Patient` embed a shared
//! [`UserProfile`] by value and expose it through the [`Authenticatable`]
//! capability, which is all that credential lookups and username checks need.

pub mod doctor;
pub mod patient;
pub mod specialty;
pub mod user;

pub use doctor::Doctor;
pub use patient::Patient;
pub use specialty::{Specialty, SpecialtyName};
pub use user::{Authenticatable, UserKind, UserProfile};

//! `clinic-auth`: username uniqueness and login session.
//!
//! Both components work over a set of [`CredentialDirectory`] implementations
//! (the doctor and patient repositories in practice) that know nothing about
//! each other. This crate has no storage of its own.

pub mod directory;
pub mod principal;
pub mod session;
pub mod validator;

pub use directory::{CredentialDirectory, Credentials};
pub use principal::Principal;
pub use session::{AuthError, Authenticator};
pub use validator::GlobalUsernameValidator;

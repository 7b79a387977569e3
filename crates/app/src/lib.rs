//! `clinic-app`: configuration, service layer and process wiring.

pub mod config;
pub mod context;
pub mod error;
pub mod services;

pub use config::{ClinicConfig, StorageBackend};
pub use context::{ClinicContext, CollectionSummary};
pub use error::{ClinicError, ClinicResult};

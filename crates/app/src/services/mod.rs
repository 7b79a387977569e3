//! Domain services: validate a command, then hand it to the repositories.

pub mod appointments;
pub mod consultations;
pub mod doctors;
pub mod patients;
pub mod specialties;

pub use appointments::AppointmentService;
pub use consultations::ConsultationService;
pub use doctors::DoctorService;
pub use patients::PatientService;
pub use specialties::SpecialtyService;

use clinic_auth::GlobalUsernameValidator;
use clinic_core::{SoftDeletable, UserId};
use clinic_infra::{AccountRepository, Record};
use clinic_users::Authenticatable;

use crate::error::{ClinicError, ClinicResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Intent {
    Create,
    Update,
}

pub(crate) fn require_text(value: &str, field: &str) -> ClinicResult<()> {
    if value.trim().is_empty() {
        return Err(ClinicError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Checks shared by every account type: required fields, id presence for the
/// intent, and username availability in the account's own repository and
/// across all account repositories.
///
/// Callers hold [`GlobalUsernameValidator::claim`] from this check until the
/// account is stored.
pub(crate) fn check_account<T>(
    repository: &AccountRepository<T>,
    validator: &GlobalUsernameValidator,
    account: &T,
    intent: Intent,
) -> ClinicResult<()>
where
    T: Record<Id = UserId> + SoftDeletable + Authenticatable,
{
    let profile = account.profile();
    require_text(&profile.full_name, "full name")?;
    require_text(&profile.username, "username")?;
    require_text(&profile.password, "password")?;

    let id = account.user_id();
    let exists = repository.search_by_id(&id).is_some();
    match intent {
        Intent::Create if exists => {
            return Err(ClinicError::conflict(format!("{} {id} already exists", T::KIND)));
        }
        Intent::Update if !exists => {
            return Err(ClinicError::not_found(format!("{} {id}", T::KIND)));
        }
        _ => {}
    }

    let username = account.username();
    let taken_locally = repository
        .search_by_username(username)
        .is_some_and(|found| found.user_id() != id);
    let exclude = match intent {
        Intent::Create => None,
        Intent::Update => Some(id),
    };
    if taken_locally || validator.username_exists(username, exclude) {
        return Err(ClinicError::conflict(format!("username '{username}' is taken")));
    }

    Ok(())
}

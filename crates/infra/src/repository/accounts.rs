//! Repositories for user accounts (doctors and patients).
//!
//! Accounts are soft-deleted: `delete_by_id` only deactivates the record, and
//! inactive accounts drop out of `list_all` and username lookups.

use clinic_auth::{CredentialDirectory, Credentials};
use clinic_core::{SoftDeletable, SpecialtyId, UserId};
use clinic_users::{Authenticatable, Doctor, Patient};

use super::{Record, Repository, RepositoryResult};
use crate::store::CollectionStore;

impl Record for Doctor {
    const KIND: &'static str = "doctor";

    fn conflicts_with(&self, other: &Self) -> bool {
        self.profile.id() == other.profile.id() || self.profile.same_identity(&other.profile)
    }
}

impl Record for Patient {
    const KIND: &'static str = "patient";

    fn conflicts_with(&self, other: &Self) -> bool {
        self.profile.id() == other.profile.id() || self.profile.same_identity(&other.profile)
    }
}

pub type DoctorRepository = AccountRepository<Doctor>;
pub type PatientRepository = AccountRepository<Patient>;

/// Repository for an account type.
#[derive(Debug)]
pub struct AccountRepository<T>
where
    T: Record<Id = UserId> + SoftDeletable + Authenticatable,
{
    inner: Repository<T>,
}

impl<T> AccountRepository<T>
where
    T: Record<Id = UserId> + SoftDeletable + Authenticatable,
{
    pub fn open(store: impl CollectionStore<T> + 'static) -> RepositoryResult<Self> {
        Ok(Self {
            inner: Repository::open(store)?,
        })
    }

    /// Store a new account. Fails if the id, or the username and document
    /// number pair, is already stored.
    ///
    /// Inactive accounts still hold their username and document pair here,
    /// although the username itself is free for an account with another
    /// document number.
    pub fn add(&self, account: T) -> RepositoryResult<()> {
        self.inner.insert(account)
    }

    pub fn update(&self, account: T) -> RepositoryResult<()> {
        self.inner.replace(account)
    }

    pub fn delete_by_id(&self, id: &UserId) -> RepositoryResult<()> {
        self.inner.soft_delete(id)
    }

    /// Look up by id, whether active or not.
    pub fn search_by_id(&self, id: &UserId) -> Option<T> {
        self.inner.find_by_id(id)
    }

    /// Active accounts.
    pub fn list_all(&self) -> Vec<T> {
        self.inner.filter(|account| account.is_active())
    }

    pub fn list_including_inactive(&self) -> Vec<T> {
        self.inner.get_all()
    }

    /// Active account with this username. Surrounding whitespace is ignored,
    /// case is not.
    pub fn search_by_username(&self, username: &str) -> Option<T> {
        let username = username.trim();
        self.inner.find(|account| account.is_active() && account.username() == username)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&self) -> RepositoryResult<()> {
        self.inner.clear()
    }

    pub fn reload(&self) -> RepositoryResult<()> {
        self.inner.reload()
    }
}

impl AccountRepository<Doctor> {
    /// Active doctors practising the given specialty.
    pub fn search_by_specialty(&self, specialty_id: &SpecialtyId) -> Vec<Doctor> {
        self.inner.filter(|doctor| doctor.is_active() && doctor.practises(specialty_id))
    }
}

impl<T> CredentialDirectory for AccountRepository<T>
where
    T: Record<Id = UserId> + SoftDeletable + Authenticatable,
{
    fn find_credentials(&self, username: &str) -> Option<Credentials> {
        self.search_by_username(username)
            .map(|account| Credentials::from_account(&account))
    }
}

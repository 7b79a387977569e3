//! Repositories: an in-memory collection cached in front of a [`CollectionStore`].
//!
//! The collection is loaded once when the repository is opened. Every mutation
//! is applied and then persisted while the write lock is held, so the
//! check-mutate-persist sequence cannot interleave with another writer.
//!
//! If persisting fails the in-memory change is kept and the caller receives
//! [`RepositoryError::Store`]. Nothing is rolled back.

pub mod accounts;
pub mod appointments;
pub mod consultations;
pub mod specialties;

pub use accounts::{AccountRepository, DoctorRepository, PatientRepository};
pub use appointments::AppointmentRepository;
pub use consultations::ConsultationRepository;
pub use specialties::SpecialtyRepository;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use clinic_core::{DomainError, Entity, SoftDeletable};

use crate::store::{CollectionStore, StoreError};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An equivalent record (same id, or same natural key) is already stored.
    #[error("{kind} {key} already exists")]
    Duplicate { kind: &'static str, key: String },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// The stored record refused the change.
    #[error(transparent)]
    Rejected(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A record type a [`Repository`] can hold.
pub trait Record: Entity + Clone + Send + Sync + 'static {
    /// Collection name used in errors and logs.
    const KIND: &'static str;

    /// Whether `self` and `other` may not both be stored.
    fn conflicts_with(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Generic repository over one record type.
pub struct Repository<T: Record> {
    items: RwLock<Vec<T>>,
    store: Box<dyn CollectionStore<T>>,
}

impl<T: Record> Repository<T> {
    /// Open the repository, loading the collection from `store`.
    ///
    /// A store that cannot be read (malformed file, I/O failure) fails the
    /// open instead of starting empty.
    pub fn open(store: impl CollectionStore<T> + 'static) -> RepositoryResult<Self> {
        let items = store.load()?;
        tracing::info!(
            collection = T::KIND,
            location = %store.location(),
            count = items.len(),
            "collection loaded"
        );
        Ok(Self {
            items: RwLock::new(items),
            store: Box::new(store),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, items: &[T]) -> RepositoryResult<()> {
        self.store.save(items).map_err(|e| {
            tracing::warn!(
                collection = T::KIND,
                location = %self.store.location(),
                error = %e,
                "persist failed; in-memory state kept"
            );
            RepositoryError::Store(e)
        })
    }

    fn not_found(id: &T::Id) -> RepositoryError {
        RepositoryError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }

    /// Copy of every stored record, in insertion order.
    pub fn get_all(&self) -> Vec<T> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Write the current in-memory state to the store.
    pub fn persist(&self) -> RepositoryResult<()> {
        let items = self.read();
        self.commit(&items)
    }

    pub fn clear(&self) -> RepositoryResult<()> {
        let mut items = self.write();
        items.clear();
        self.commit(&items)
    }

    /// Replace the in-memory state with what the store currently holds.
    pub fn reload(&self) -> RepositoryResult<()> {
        let mut items = self.write();
        *items = self.store.load()?;
        tracing::debug!(collection = T::KIND, count = items.len(), "collection reloaded");
        Ok(())
    }

    pub fn insert(&self, item: T) -> RepositoryResult<()> {
        let mut items = self.write();
        if let Some(existing) = items.iter().find(|existing| existing.conflicts_with(&item)) {
            return Err(RepositoryError::Duplicate {
                kind: T::KIND,
                key: existing.id().to_string(),
            });
        }
        items.push(item);
        self.commit(&items)
    }

    /// Replace the stored record that has the same id as `item`.
    pub fn replace(&self, item: T) -> RepositoryResult<()> {
        let mut items = self.write();
        let slot = items
            .iter_mut()
            .find(|existing| existing.id() == item.id())
            .ok_or_else(|| Self::not_found(item.id()))?;
        *slot = item;
        self.commit(&items)
    }

    /// Apply `f` to the stored record in place, then persist.
    pub fn modify<R>(&self, id: &T::Id, f: impl FnOnce(&mut T) -> R) -> RepositoryResult<R> {
        self.try_modify(id, |item| Ok(f(item)))
    }

    /// Like [`Repository::modify`], but `f` may refuse the change.
    ///
    /// A refused change is neither applied nor persisted.
    pub fn try_modify<R>(
        &self,
        id: &T::Id,
        f: impl FnOnce(&mut T) -> Result<R, DomainError>,
    ) -> RepositoryResult<R> {
        let mut items = self.write();
        let item = items
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        let mut draft = item.clone();
        let out = f(&mut draft)?;
        *item = draft;
        self.commit(&items)?;
        Ok(out)
    }

    pub fn find_by_id(&self, id: &T::Id) -> Option<T> {
        self.find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.read().iter().any(|item| item.id() == id)
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.read().iter().find(|item| predicate(item)).cloned()
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.read()
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }
}

impl<T: Record + SoftDeletable> Repository<T> {
    /// Mark the record inactive. It stays stored and addressable by id.
    pub fn soft_delete(&self, id: &T::Id) -> RepositoryResult<()> {
        self.modify(id, |item| item.deactivate())
    }
}

impl<T: Record> core::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Repository")
            .field("collection", &T::KIND)
            .field("location", &self.store.location())
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;

    use super::*;

    /// Loads an empty collection and refuses every save.
    pub struct FailingStore;

    impl<T> CollectionStore<T> for FailingStore {
        fn load(&self) -> Result<Vec<T>, StoreError> {
            Ok(Vec::new())
        }

        fn save(&self, _items: &[T]) -> Result<(), StoreError> {
            Err(StoreError::InvalidPath(PathBuf::from("/dev/null/unwritable")))
        }

        fn location(&self) -> String {
            "failing".to_string()
        }
    }
}

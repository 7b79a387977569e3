use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::json::{JsonStore, StoreError};

/// Backing storage for one collection of records.
///
/// Implementations load and save the full collection; ordering is preserved.
pub trait CollectionStore<T>: Send + Sync {
    fn load(&self) -> Result<Vec<T>, StoreError>;

    fn save(&self, items: &[T]) -> Result<(), StoreError>;

    /// Human-readable location, used in logs.
    fn location(&self) -> String;
}

impl<T, S> CollectionStore<T> for Arc<S>
where
    S: CollectionStore<T> + ?Sized,
{
    fn load(&self) -> Result<Vec<T>, StoreError> {
        (**self).load()
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        (**self).save(items)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

/// A collection persisted as a JSON array in a single file.
#[derive(Debug)]
pub struct JsonCollectionStore<T> {
    path: PathBuf,
    // Serialises writers to this file.
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonCollectionStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> CollectionStore<T> for JsonCollectionStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Vec<T>, StoreError> {
        JsonStore::read(&self.path, Vec::new())
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        JsonStore::write(&self.path, items)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the last saved snapshot in memory.
///
/// Used for the in-memory storage mode and in tests.
#[derive(Debug)]
pub struct InMemoryCollectionStore<T> {
    items: RwLock<Vec<T>>,
}

impl<T> Default for InMemoryCollectionStore<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Clone> InMemoryCollectionStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T> CollectionStore<T> for InMemoryCollectionStore<T>
where
    T: Clone + Send + Sync,
{
    fn load(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        *self.items.write().unwrap_or_else(PoisonError::into_inner) = items.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

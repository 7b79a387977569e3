use clinic_core::SpecialtyId;
use clinic_users::{Specialty, SpecialtyName};

use super::{Record, Repository, RepositoryResult};
use crate::store::CollectionStore;

impl Record for Specialty {
    const KIND: &'static str = "specialty";
}

#[derive(Debug)]
pub struct SpecialtyRepository {
    inner: Repository<Specialty>,
}

impl SpecialtyRepository {
    pub fn open(store: impl CollectionStore<Specialty> + 'static) -> RepositoryResult<Self> {
        Ok(Self {
            inner: Repository::open(store)?,
        })
    }

    pub fn add(&self, specialty: Specialty) -> RepositoryResult<()> {
        self.inner.insert(specialty)
    }

    pub fn update(&self, specialty: Specialty) -> RepositoryResult<()> {
        self.inner.replace(specialty)
    }

    pub fn search_by_id(&self, id: &SpecialtyId) -> Option<Specialty> {
        self.inner.find_by_id(id)
    }

    pub fn search_by_name(&self, name: SpecialtyName) -> Option<Specialty> {
        self.inner.find(|s| s.name == name)
    }

    pub fn list_all(&self) -> Vec<Specialty> {
        self.inner.get_all()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryCollectionStore;
    use clinic_core::Entity;

    #[test]
    fn finds_by_name_and_id() {
        let repo = SpecialtyRepository::open(InMemoryCollectionStore::new()).unwrap();
        let cardio = Specialty::new(SpecialtyName::Cardiology);
        repo.add(cardio.clone()).unwrap();

        assert_eq!(repo.search_by_name(SpecialtyName::Cardiology), Some(cardio.clone()));
        assert_eq!(repo.search_by_id(cardio.id()), Some(cardio));
        assert!(repo.search_by_name(SpecialtyName::Dermatology).is_none());
    }
}

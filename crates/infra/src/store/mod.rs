//! Durable storage for whole collections.
//!
//! A collection is always read and written as one JSON array; there is no
//! partial update. [`JsonStore`] does the file work, [`CollectionStore`] is the
//! seam repositories are written against.

pub mod collection;
pub mod json;

pub use collection::{CollectionStore, InMemoryCollectionStore, JsonCollectionStore};
pub use json::{JsonStore, StoreError};

mod memory;

pub use memory::{MAX_ROW_BYTES, MemStore};

use crate::{error::StoreError, traits::Entity};
use std::sync::Arc;

///
/// EntityStore
///
/// The single capability a lazy reference requires of its backing store:
/// resolve one primary key into one instance, or say why not.
/// A missing entity is `StoreError::NotFound`; anything else is a backend
/// failure. Implementations must be callable from any thread that resolves.
///

pub trait EntityStore<E: Entity>: Send + Sync {
    fn find(&self, key: &E::PrimaryKey) -> Result<E, StoreError>;
}

/// Shared, non-owning handle to a store, as held by lazy references.
pub type StoreHandle<E> = Arc<dyn EntityStore<E>>;

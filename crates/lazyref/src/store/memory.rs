use crate::{
    error::StoreError,
    key::Key,
    serialize::{SerializeError, deserialize_bounded, serialize},
    store::EntityStore,
    traits::Entity,
};
use parking_lot::RwLock;
use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    sync::atomic::{AtomicU64, Ordering},
};

/// Max serialized bytes for a single row to keep lookups bounded.
pub const MAX_ROW_BYTES: usize = 4 * 1024 * 1024;

///
/// RawRow
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RawRow(Vec<u8>);

impl RawRow {
    fn try_new(bytes: Vec<u8>) -> Result<Self, StoreError> {
        if bytes.len() > MAX_ROW_BYTES {
            return Err(StoreError::invariant(format!(
                "row exceeds max size: {} bytes (limit {MAX_ROW_BYTES})",
                bytes.len()
            )));
        }

        Ok(Self(bytes))
    }

    fn try_decode<E: Entity>(&self) -> Result<E, SerializeError> {
        deserialize_bounded::<E>(&self.0, MAX_ROW_BYTES)
    }
}

///
/// DataKey
///
/// One keyspace across all entity types: the entity path namespaces the
/// normalized key, so equal numeric keys of different types never collide.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct DataKey {
    path: &'static str,
    key: Key,
}

impl DataKey {
    fn new<E: Entity>(key: impl Into<Key>) -> Self {
        Self {
            path: E::PATH,
            key: key.into(),
        }
    }
}

impl Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.key)
    }
}

///
/// MemStore
///
/// Thread-safe, row-serialized in-memory store. Rows live as bounded CBOR
/// blobs keyed by (entity path, key), so every lookup exercises the same
/// decode path a persistent backend would. Keeps a running count of `find`
/// calls, hits and misses alike.
///

#[derive(Default)]
pub struct MemStore {
    rows: RwLock<BTreeMap<DataKey, RawRow>>,
    finds: AtomicU64,
}

impl MemStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `find` calls served so far.
    #[must_use]
    pub fn find_count(&self) -> u64 {
        self.finds.load(Ordering::Relaxed)
    }

    /// Insert or replace the row for an entity instance.
    pub fn insert<E: Entity>(&self, entity: &E) -> Result<(), StoreError> {
        let bytes = serialize(entity).map_err(StoreError::from)?;
        let row = RawRow::try_new(bytes)?;

        self.rows
            .write()
            .insert(DataKey::new::<E>(entity.primary_key()), row);

        Ok(())
    }

    /// Remove an entity row; true when something was removed.
    pub fn remove<E: Entity>(&self, key: &E::PrimaryKey) -> bool {
        self.rows
            .write()
            .remove(&DataKey::new::<E>(key.clone()))
            .is_some()
    }

    #[must_use]
    pub fn contains<E: Entity>(&self, key: &E::PrimaryKey) -> bool {
        self.rows.read().contains_key(&DataKey::new::<E>(key.clone()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    pub fn clear(&self) {
        self.rows.write().clear();
    }

    /// Plant raw bytes under an entity's key, bypassing the codec.
    #[cfg(test)]
    pub(crate) fn insert_raw<E: Entity>(&self, key: impl Into<Key>, bytes: Vec<u8>) {
        self.rows.write().insert(DataKey::new::<E>(key), RawRow(bytes));
    }
}

impl<E: Entity> EntityStore<E> for MemStore {
    fn find(&self, key: &E::PrimaryKey) -> Result<E, StoreError> {
        self.finds.fetch_add(1, Ordering::Relaxed);

        let data_key = DataKey::new::<E>(key.clone());
        let rows = self.rows.read();
        let Some(row) = rows.get(&data_key) else {
            return Err(StoreError::not_found::<E>(key.clone()));
        };

        // the rendered data key names the row a corrupt decode came from
        row.try_decode::<E>()
            .map_err(|err| StoreError::corrupt(format!("{data_key}: {err}")))
    }
}

///
/// TESTS
///

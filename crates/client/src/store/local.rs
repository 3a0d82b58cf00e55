//! Typed access to the local cache.
//!
//! Reads never fail: a missing key and a corrupt value both load as `None`.
//! Writes never fail either; errors are logged and the in-memory state stays
//! authoritative until the next successful save.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use lifelines_core::cache::{
    collection_key, deserialize_collection, deserialize_timestamp, serialize_collection,
    serialize_timestamp, CacheStore, SerializationError, LAST_SYNC_KEY,
};
use lifelines_core::timeline::TimelineRecord;

#[derive(Clone)]
pub struct LocalCache {
    store: Arc<dyn CacheStore>,
}

impl LocalCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Loads a collection. `None` when it was never saved or cannot be read.
    pub fn load_collection<R: TimelineRecord>(&self) -> Option<Vec<R>> {
        self.load(collection_key(R::KIND), deserialize_collection::<R>)
    }

    pub fn save_collection<R: TimelineRecord>(&self, records: &[R]) {
        let key = collection_key(R::KIND);
        match serialize_collection(records) {
            Ok(bytes) => self.save(key, &bytes),
            Err(e) => tracing::warn!(key, error = %e, "failed to encode cached collection"),
        }
    }

    pub fn load_last_sync(&self) -> Option<DateTime<Utc>> {
        self.load(LAST_SYNC_KEY, deserialize_timestamp)
    }

    pub fn save_last_sync(&self, at: DateTime<Utc>) {
        self.save(LAST_SYNC_KEY, &serialize_timestamp(at));
    }

    fn load<T>(
        &self,
        key: &str,
        decode: impl FnOnce(&[u8]) -> Result<T, SerializationError>,
    ) -> Option<T> {
        let bytes = match self.store.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read local cache");
                return None;
            }
        };
        match decode(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring corrupt cache value");
                None
            }
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) {
        if let Err(e) = self.store.set(key, bytes) {
            tracing::warn!(key, error = %e, "failed to write local cache");
        }
    }
}

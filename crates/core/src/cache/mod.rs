//! Local cache contract: storage keys, the byte store trait and the pure
//! functions that turn collections and timestamps into stored bytes.

mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{all_keys, collection_key, EVENTS_KEY, LAST_SYNC_KEY, PEOPLE_KEY};
pub use serialization::{
    deserialize_collection, deserialize_timestamp, serialize_collection, serialize_timestamp,
    SerializationError,
};
pub use traits::CacheStore;

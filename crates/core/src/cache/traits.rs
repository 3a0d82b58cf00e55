use super::Result;

/// Durable key-value storage for cached collections.
///
/// Values are opaque bytes; typed access lives in the serialization
/// functions of this module. Calls are synchronous and short, so they may
/// be made from async code without a blocking pool.
pub trait CacheStore: Send + Sync {
    /// Gets a value by key. A key that was never written yields `None`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value, replacing any previous one.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Deletes a value. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

//! Local cache backends and the typed cache used by the sync engine.

mod file;
mod local;
mod memory;

use std::sync::Arc;

use lifelines_core::cache::CacheStore;

use crate::config::ClientConfig;

pub use file::FileStore;
pub use local::LocalCache;
pub use memory::MemoryStore;

/// Opens the file cache in the configured cache directory.
pub fn open_file_store(config: &ClientConfig) -> crate::Result<Arc<dyn CacheStore>> {
    Ok(Arc::new(FileStore::open(&config.cache_dir)?))
}

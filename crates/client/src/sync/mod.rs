//! The sync engine: in-memory collections kept in step with the local
//! cache and the remote gateway.

mod engine;
#[cfg(test)]
pub(crate) mod testing;

pub use engine::{StatusReport, SyncEngine, WriteOutcome};

//! lifelines_client - offline-first sync client and CLI for the lifelines
//! family timeline.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod store;
pub mod sync;

pub use client::GatewayClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use sync::SyncEngine;

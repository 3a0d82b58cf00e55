//! CLI command definitions.

pub mod events;
pub mod people;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{ClientConfig, DEFAULT_CACHE_DIR};

/// Family timeline with an offline-first local cache.
#[derive(Debug, Parser)]
#[command(name = "lifelines")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Gateway endpoint (the deployed script URL).
    #[arg(long, env = "LIFELINES_API_URL")]
    pub endpoint: Option<String>,

    /// Directory of the local cache.
    #[arg(long, env = "LIFELINES_CACHE_DIR", default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Skip the startup sync and work from the local cache.
    #[arg(long)]
    pub offline: bool,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Client configuration: environment defaults overridden by flags.
    pub fn config(&self) -> ClientConfig {
        let config = ClientConfig::from_env().with_cache_dir(self.cache_dir.clone());
        match self.endpoint.as_deref().map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => config.with_endpoint(endpoint),
            _ => ClientConfig {
                endpoint: None,
                ..config
            },
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable tables.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a full sync and report the outcome.
    Sync,
    /// Show counts, last sync time and the current status.
    Status,
    /// Family members.
    People(people::PeopleCommand),
    /// Life events.
    Events(events::EventsCommand),
}

impl Commands {
    /// Whether the startup sync runs before the command.
    pub fn syncs_on_startup(&self, offline: bool) -> bool {
        matches!(self, Commands::Sync) || !offline
    }
}

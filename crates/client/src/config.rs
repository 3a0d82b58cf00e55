//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use lifelines_core::sync::DEFAULT_STATUS_WINDOW;

/// Default directory for the local cache.
pub const DEFAULT_CACHE_DIR: &str = ".lifelines";

/// Client configuration, passed to the engine and gateway client at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Gateway endpoint. `None` means every remote call fails without a
    /// request being made.
    pub endpoint: Option<String>,
    /// Directory holding one file per cache key.
    pub cache_dir: PathBuf,
    /// How long a terminal sync status stays visible.
    pub status_display_window: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            status_display_window: DEFAULT_STATUS_WINDOW,
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables.
    ///
    /// - `LIFELINES_API_URL`: gateway endpoint (unset or blank disables remote calls)
    /// - `LIFELINES_CACHE_DIR`: cache directory (default: `.lifelines`)
    /// - `LIFELINES_STATUS_WINDOW_MS`: status display window in milliseconds (default: 3000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let endpoint = lookup("LIFELINES_API_URL").filter(|s| !s.trim().is_empty());
        let cache_dir = lookup("LIFELINES_CACHE_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_dir);
        let status_display_window = lookup("LIFELINES_STATUS_WINDOW_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.status_display_window);

        Self {
            endpoint,
            cache_dir,
            status_display_window,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    pub fn with_status_display_window(mut self, window: Duration) -> Self {
        self.status_display_window = window;
        self
    }
}

use std::env;

/// Gateway configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed the stores with the bundled demo dataset at startup (default: true)
    pub seed_demo: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LIFELINES_SEED_DEMO` - `0` or `false` starts with empty stores
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed_demo = lookup("LIFELINES_SEED_DEMO")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);
        Self { seed_demo }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { seed_demo: true }
    }
}

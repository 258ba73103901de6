//! Client configuration.
//!
//! Values come from environment variables, falling back to defaults.  Invalid
//! values are logged and ignored.

use std::path::PathBuf;

use stavba_shared::constants::DEFAULT_CHANNEL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Database file.  `None` selects the platform data directory.
    /// Env: `STAVBA_DB_PATH`
    pub db_path: Option<PathBuf>,

    /// Keep everything in memory; nothing survives the process.
    /// Env: `STAVBA_IN_MEMORY` (true/false)
    /// Default: `false`
    pub in_memory: bool,

    /// Write first-run defaults for absent collections at startup.
    /// Env: `STAVBA_SEED_DEFAULTS` (true/false)
    /// Default: `true`
    pub seed_defaults: bool,

    /// Channel chat messages go to when the UI names none.
    /// Env: `STAVBA_DEFAULT_CHANNEL`
    /// Default: `"general"`
    pub default_channel: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            in_memory: false,
            seed_defaults: true,
            default_channel: DEFAULT_CHANNEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("STAVBA_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(val) = lookup("STAVBA_IN_MEMORY") {
            match parse_bool(&val) {
                Some(flag) => config.in_memory = flag,
                None => tracing::warn!(value = %val, "Invalid STAVBA_IN_MEMORY, using default"),
            }
        }

        if let Some(val) = lookup("STAVBA_SEED_DEFAULTS") {
            match parse_bool(&val) {
                Some(flag) => config.seed_defaults = flag,
                None => {
                    tracing::warn!(value = %val, "Invalid STAVBA_SEED_DEFAULTS, using default")
                }
            }
        }

        if let Some(channel) = lookup("STAVBA_DEFAULT_CHANNEL") {
            let channel = channel.trim();
            if !channel.is_empty() {
                config.default_channel = channel.to_string();
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

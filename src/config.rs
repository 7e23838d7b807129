//! Layered configuration: compiled defaults, an optional TOML file, then
//! `MOODGARDEN_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and large

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::{
    breathing::phase::BreathingConfig,
    core::store::{CorruptPolicy, DayStore, StoreResult},
    day::LocalClock,
    persist::sqlite::SqliteKv,
    runtime::handle::RuntimeConfig,
};

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "moodgarden.toml";

/// Configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the model.
    #[error("invalid configuration: {0}")]
    Figment(#[from] figment::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GardenConfig {
    /// Where days are persisted.
    pub storage: StorageConfig,
    /// Breathing phase timings and haptic patterns.
    pub breathing: BreathingConfig,
    /// Log filtering.
    pub logging: LoggingConfig,
    /// Runtime channel sizing.
    pub runtime: RuntimeConfig,
}

/// Storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite database file. In-memory when unset.
    pub path: Option<PathBuf>,
    /// Handling of garden data that fails to decode.
    pub corrupt_policy: CorruptPolicy,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "moodgarden=info,warn".to_string(),
        }
    }
}

impl GardenConfig {
    /// Opens the configured SQLite store against the local clock.
    pub fn open_store(&self) -> StoreResult<DayStore<SqliteKv, LocalClock>> {
        let kv = match &self.storage.path {
            Some(path) => SqliteKv::open(path)?,
            None => SqliteKv::open_in_memory()?,
        };
        Ok(DayStore::new(kv, LocalClock).with_policy(self.storage.corrupt_policy))
    }
}

/// Loads `./moodgarden.toml` (if present) with environment overrides.
pub fn load_config() -> Result<GardenConfig, ConfigError> {
    load_config_from_path(Path::new(CONFIG_FILE))
}

/// Loads `path` (skipped when missing) with environment overrides.
pub fn load_config_from_path(path: &Path) -> Result<GardenConfig, ConfigError> {
    Ok(build_figment(path).extract()?)
}

/// Parses configuration from TOML text only.
pub fn load_config_from_str(toml_content: &str) -> Result<GardenConfig, ConfigError> {
    Ok(Figment::new()
        .merge(Serialized::defaults(GardenConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()?)
}

/// Figment used by [`load_config_from_path`], before extraction.
pub fn build_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(GardenConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
}

const SECTIONS: [&str; 4] = ["storage", "breathing", "logging", "runtime"];

// Keys reach the map uppercase with the prefix stripped. Section names are
// split off explicitly; field names keep their underscores
// (MOODGARDEN_STORAGE_CORRUPT_POLICY -> storage.corrupt_policy).
fn env_provider() -> Env {
    Env::prefixed("MOODGARDEN_").map(|key| env_key_path(key.as_str()).into())
}

fn env_key_path(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(field) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{field}");
        }
    }
    key
}

//! YAML settings for the conflict engine, the local cache and logging
//!
//! Every section is optional in the file; missing keys take the values of
//! the matching `Default` impl. A config that parses may still be unusable,
//! so callers run [`Config::validate`] before relying on it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::TieBreak;

const APP_DIR: &str = "cabinshare";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Largest suggestion search window accepted, in days on each side
pub const MAX_SEARCH_WINDOW_DAYS: u32 = 365;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Days searched on each side of a requested start date
    pub search_window_days: u32,
    /// Suggestions returned when the caller does not ask for a count
    pub max_suggestions: usize,
    pub tie_break: TieBreak,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_window_days: 30,
            max_suggestions: 3,
            tie_break: TieBreak::EarlierFirst,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite file holding the reservation snapshot
    pub database: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database: base.join(APP_DIR).join("reservations.db"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter level used when neither `RUST_LOG` nor `-v` is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
        }
    }
}

/// Why a config file could not be turned into a [`Config`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Config::load`], but a missing or broken file yields the defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// `<config dir>/cabinshare/config.yaml`, e.g. `~/.config/cabinshare/config.yaml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.yaml")
    }

    /// Lists every problem found; empty means usable
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();
        let mut check = |ok: bool, field: &str, message: String| {
            if !ok {
                problems.push(ValidationError {
                    field: field.to_string(),
                    message,
                });
            }
        };

        check(
            (1..=MAX_SEARCH_WINDOW_DAYS).contains(&self.engine.search_window_days),
            "engine.search_window_days",
            format!("must be between 1 and {MAX_SEARCH_WINDOW_DAYS}"),
        );
        check(
            self.engine.max_suggestions >= 1,
            "engine.max_suggestions",
            "must be at least 1".to_string(),
        );
        check(
            !self.store.database.as_os_str().is_empty(),
            "store.database",
            "must name a file".to_string(),
        );
        check(
            LOG_LEVELS.contains(&self.logging.level.as_str()),
            "logging.level",
            format!(
                "unknown level '{}' (expected one of {})",
                self.logging.level,
                LOG_LEVELS.join("/")
            ),
        );

        problems
    }
}

/// One failed check, addressed by its dotted YAML key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Programmatic construction on top of the defaults
///
/// ```rust
/// use cabinshare_core::config::ConfigBuilder;
/// use cabinshare_core::domain::TieBreak;
///
/// let config = ConfigBuilder::new()
///     .engine_search_window_days(14)
///     .engine_tie_break(TieBreak::LaterFirst)
///     .build();
/// assert_eq!(config.engine.search_window_days, 14);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    inner: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine_search_window_days(mut self, days: u32) -> Self {
        self.inner.engine.search_window_days = days;
        self
    }

    pub fn engine_max_suggestions(mut self, max: usize) -> Self {
        self.inner.engine.max_suggestions = max;
        self
    }

    pub fn engine_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.inner.engine.tie_break = tie_break;
        self
    }

    pub fn store_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.inner.store.database = path.into();
        self
    }

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.inner.logging.level = level.into();
        self
    }

    pub fn build(self) -> Config {
        self.inner
    }

    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        match self.inner.validate() {
            problems if problems.is_empty() => Ok(self.inner),
            problems => Err(problems),
        }
    }
}

//! Configuration for hdtop.
//!
//! Values live in a TOML file (`$XDG_CONFIG_HOME/hdtop/hdtop.toml` by
//! default) with a `[core]` and an `[apps]` section. [`ConfigStore`] is the
//! raw `get(section, key)` provider backing that file; [`Config`] is the
//! validated, immutable view built from it once at startup.

mod keys;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

pub use keys::{
    ConfigKey, ConfigValue, DEFAULT_COLUMNS, DEFAULT_QUERY_INTERVAL, parse_base_uri,
    parse_display_column, parse_interval,
};

use crate::view::columns::MAX_COLUMNS;

/// Program name, used for config and log paths.
pub const PROG_NAME: &str = "hdtop";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value that does not validate for its key.
    #[error("Invalid configuration value: {value}{}", expected_suffix(.expected))]
    InvalidValue {
        value: String,
        /// Enumerated acceptable values, when the key has a fixed set.
        expected: Vec<String>,
    },
    /// A required key with no value.
    #[error("Config `{0}` is required.")]
    Missing(ConfigKey),
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
    #[error("Failed to access {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

fn expected_suffix(expected: &[String]) -> String {
    if expected.is_empty() {
        String::new()
    } else {
        format!(". Expected values: {}", expected.join(", "))
    }
}

impl ConfigError {
    pub(crate) fn invalid(value: &str) -> Self {
        ConfigError::InvalidValue {
            value: value.to_string(),
            expected: Vec::new(),
        }
    }

    /// Operator guidance printed after the error, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            ConfigError::Missing(key) => Some(format!(
                "Use `{} config {} <value>` to set one.",
                PROG_NAME, key
            )),
            _ => None,
        }
    }
}

/// Returns `$XDG_CONFIG_HOME/hdtop/hdtop.toml` (or `~/.config/...`).
pub fn default_config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
        .join(PROG_NAME)
        .join(format!("{}.toml", PROG_NAME))
}

/// Returns `$XDG_CACHE_HOME/hdtop/hdtop.log` (or `~/.cache/...`).
pub fn default_log_path() -> PathBuf {
    xdg_dir("XDG_CACHE_HOME", ".cache")
        .join(PROG_NAME)
        .join(format!("{}.log", PROG_NAME))
}

fn xdg_dir(var: &str, fallback: &str) -> PathBuf {
    match std::env::var_os(var) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(fallback),
    }
}

/// Raw, file-backed configuration values.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    path: PathBuf,
    values: BTreeMap<ConfigKey, String>,
}

impl ConfigStore {
    /// Loads the store from `path`. A missing file is an empty store.
    ///
    /// Unknown sections and keys are ignored. Values are kept raw here and
    /// validated by [`Config::from_store`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let mut store = ConfigStore {
            path: path.clone(),
            values: BTreeMap::new(),
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config file at {}", path.display());
                return Ok(store);
            }
            Err(e) => {
                return Err(ConfigError::Io {
                    path,
                    message: e.to_string(),
                });
            }
        };

        let table: toml::Table = text.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
            path: path.clone(),
            message: e.message().to_string(),
        })?;

        for (section, entries) in &table {
            let Some(entries) = entries.as_table() else {
                warn!(section = %section, "ignoring non-table config entry");
                continue;
            };
            for (name, value) in entries {
                let Some(key) = ConfigKey::from_parts(section, name) else {
                    warn!(key = %format!("{section}.{name}"), "ignoring unknown config key");
                    continue;
                };
                let raw = match value {
                    toml::Value::String(s) => s.clone(),
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    other => {
                        return Err(ConfigError::Parse {
                            path,
                            message: format!("unsupported value for {}: {}", key, other),
                        });
                    }
                };
                store.values.insert(key, raw);
            }
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw stored value for `section.key`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        ConfigKey::from_parts(section, key).and_then(|k| self.raw(k))
    }

    /// Raw stored value for `key`.
    pub fn raw(&self, key: ConfigKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Stored value, falling back to the built-in default.
    pub fn effective(&self, key: ConfigKey) -> Option<String> {
        self.raw(key)
            .map(str::to_string)
            .or_else(|| key.default_value().map(|v| v.to_string()))
    }

    /// Validates `raw` for `key`, stores the normalized value and saves the file.
    pub fn set(&mut self, key: ConfigKey, raw: &str) -> Result<ConfigValue, ConfigError> {
        let value = key.validate(raw)?;
        self.values.insert(key, value.to_string());
        self.save()?;
        Ok(value)
    }

    /// Writes all stored values back to the file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let io_err = |e: std::io::Error| ConfigError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        };

        let mut root = toml::Table::new();
        for (key, raw) in &self.values {
            let value = match key {
                ConfigKey::QueryInterval => raw
                    .parse::<f64>()
                    .map(toml::Value::Float)
                    .unwrap_or_else(|_| toml::Value::String(raw.clone())),
                _ => toml::Value::String(raw.clone()),
            };
            let section = root
                .entry(key.section())
                .or_insert(toml::Value::Table(toml::Table::new()));
            if let toml::Value::Table(section) = section {
                section.insert(key.name(), value);
            }
        }

        let text = toml::to_string(&root).map_err(|e| ConfigError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, text).map_err(io_err)
    }
}

/// Validated configuration, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Resource manager base URI (`scheme://host[:port]`).
    pub base_uri: Option<String>,
    /// Seconds between polls.
    pub query_interval: f64,
    /// Column selector slots, `MAX_COLUMNS` long; `None` = unset.
    pub display_columns: Vec<Option<&'static str>>,
}

impl Default for Config {
    fn default() -> Self {
        let mut display_columns = vec![None; MAX_COLUMNS];
        for (slot, field) in DEFAULT_COLUMNS.iter().enumerate() {
            display_columns[slot] = Some(*field);
        }
        Self {
            base_uri: None,
            query_interval: DEFAULT_QUERY_INTERVAL,
            display_columns,
        }
    }
}

impl Config {
    /// Validates every stored value; unset keys take their defaults.
    ///
    /// An invalid value is an error, never silently replaced by the default.
    pub fn from_store(store: &ConfigStore) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        for key in ConfigKey::all() {
            let Some(raw) = store.raw(key) else {
                continue;
            };
            // An explicitly empty column slot means "unset".
            if let ConfigKey::DisplayColumn(slot) = key
                && raw.trim().is_empty()
            {
                config.display_columns[slot] = None;
                continue;
            }
            config.apply(key, key.validate(raw)?);
        }
        Ok(config)
    }

    /// Overrides the base URI, e.g. from the command line.
    pub fn with_base_uri(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_uri = Some(parse_base_uri(raw)?);
        Ok(self)
    }

    /// Returns the base URI or a [`ConfigError::Missing`].
    pub fn require_base_uri(&self) -> Result<&str, ConfigError> {
        self.base_uri
            .as_deref()
            .ok_or(ConfigError::Missing(ConfigKey::HadoopAddress))
    }

    /// Poll interval as a duration. Saturates for absurdly large values.
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.query_interval).unwrap_or(Duration::MAX)
    }

    fn apply(&mut self, key: ConfigKey, value: ConfigValue) {
        match (key, value) {
            (ConfigKey::HadoopAddress, ConfigValue::Address(uri)) => self.base_uri = Some(uri),
            (ConfigKey::QueryInterval, ConfigValue::Interval(secs)) => self.query_interval = secs,
            (ConfigKey::DisplayColumn(slot), ConfigValue::Column(field)) => {
                self.display_columns[slot] = Some(field)
            }
            _ => {}
        }
    }
}

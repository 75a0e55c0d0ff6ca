//! Configuration key registry and value validation.
//!
//! Every value entering the program (config file, `hdtop config`, command
//! line) goes through [`ConfigKey::validate`].

use std::fmt;

use url::Url;

use super::ConfigError;
use crate::view::columns::{MAX_COLUMNS, find_field, known_field_names};

/// Default interval between polls, in seconds.
pub const DEFAULT_QUERY_INTERVAL: f64 = 2.0;

/// Default column selectors; remaining slots are unset.
pub const DEFAULT_COLUMNS: [&str; 9] = [
    "id",
    "state",
    "startedTime",
    "name",
    "allocatedMB",
    "allocatedVCores",
    "runningContainers",
    "queueUsagePercentage",
    "clusterUsagePercentage",
];

/// A known configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKey {
    /// `core.hadoopAddress`: resource manager base URI.
    HadoopAddress,
    /// `core.queryInterval`: seconds between polls.
    QueryInterval,
    /// `apps.displayColumn.N`: field shown in column slot N.
    DisplayColumn(usize),
}

/// A validated configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Address(String),
    Interval(f64),
    Column(&'static str),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Address(uri) => write!(f, "{}", uri),
            ConfigValue::Interval(secs) => write!(f, "{}", secs),
            ConfigValue::Column(field) => write!(f, "{}", field),
        }
    }
}

impl ConfigKey {
    /// All keys in file order.
    pub fn all() -> Vec<ConfigKey> {
        let mut keys = vec![ConfigKey::HadoopAddress, ConfigKey::QueryInterval];
        keys.extend((0..MAX_COLUMNS).map(ConfigKey::DisplayColumn));
        keys
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::HadoopAddress | ConfigKey::QueryInterval => "core",
            ConfigKey::DisplayColumn(_) => "apps",
        }
    }

    pub fn name(&self) -> String {
        match self {
            ConfigKey::HadoopAddress => "hadoopAddress".to_string(),
            ConfigKey::QueryInterval => "queryInterval".to_string(),
            ConfigKey::DisplayColumn(slot) => format!("displayColumn.{}", slot),
        }
    }

    /// Looks up a key by section and name.
    pub fn from_parts(section: &str, name: &str) -> Option<ConfigKey> {
        match (section, name) {
            ("core", "hadoopAddress") => Some(ConfigKey::HadoopAddress),
            ("core", "queryInterval") => Some(ConfigKey::QueryInterval),
            ("apps", name) => {
                let slot: usize = name.strip_prefix("displayColumn.")?.parse().ok()?;
                (slot < MAX_COLUMNS).then_some(ConfigKey::DisplayColumn(slot))
            }
            _ => None,
        }
    }

    /// Parses a dotted `section.name` key.
    pub fn parse(dotted: &str) -> Result<ConfigKey, ConfigError> {
        dotted
            .split_once('.')
            .and_then(|(section, name)| ConfigKey::from_parts(section, name))
            .ok_or_else(|| ConfigError::UnknownKey(dotted.to_string()))
    }

    /// Built-in default, if the key has one.
    pub fn default_value(&self) -> Option<ConfigValue> {
        match self {
            ConfigKey::HadoopAddress => None,
            ConfigKey::QueryInterval => Some(ConfigValue::Interval(DEFAULT_QUERY_INTERVAL)),
            ConfigKey::DisplayColumn(slot) => {
                DEFAULT_COLUMNS.get(*slot).copied().map(ConfigValue::Column)
            }
        }
    }

    /// Validates a raw value for this key.
    pub fn validate(&self, raw: &str) -> Result<ConfigValue, ConfigError> {
        match self {
            ConfigKey::HadoopAddress => parse_base_uri(raw).map(ConfigValue::Address),
            ConfigKey::QueryInterval => parse_interval(raw).map(ConfigValue::Interval),
            ConfigKey::DisplayColumn(_) => parse_display_column(raw).map(ConfigValue::Column),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.name())
    }
}

/// Reduces a URI to `scheme://host[:port]`.
///
/// Fails when the scheme or host is missing.
pub fn parse_base_uri(raw: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::invalid(raw);
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;

    let mut base = format!("{}://{}", url.scheme(), host);
    if let Some(port) = url.port() {
        base.push_str(&format!(":{}", port));
    }
    Ok(base)
}

/// Parses a poll interval in seconds. Must be finite and positive.
pub fn parse_interval(raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Ok(secs),
        _ => Err(ConfigError::invalid(raw)),
    }
}

/// Checks a column selector against the known-field registry.
pub fn parse_display_column(raw: &str) -> Result<&'static str, ConfigError> {
    find_field(raw.trim())
        .map(|column| column.field)
        .ok_or_else(|| ConfigError::InvalidValue {
            value: raw.to_string(),
            expected: known_field_names().into_iter().map(String::from).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_uri_strips_path_and_query() {
        assert_eq!(
            parse_base_uri("http://rm.example.com:8088/cluster/apps?x=1").unwrap(),
            "http://rm.example.com:8088"
        );
        assert_eq!(
            parse_base_uri("https://rm.example.com").unwrap(),
            "https://rm.example.com"
        );
    }

    #[test]
    fn test_parse_base_uri_requires_scheme_and_host() {
        for raw in ["rm.example.com", "", "/ws/v1", "file:///tmp/x", "http://"] {
            let err = parse_base_uri(raw).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { .. }),
                "{raw} -> {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("2").unwrap(), 2.0);
        assert_eq!(parse_interval(" 0.5 ").unwrap(), 0.5);
        assert!(parse_interval("0").is_err());
        assert!(parse_interval("-1").is_err());
        assert!(parse_interval("NaN").is_err());
        assert!(parse_interval("inf").is_err());
        assert!(parse_interval("fast").is_err());
    }

    #[test]
    fn test_parse_display_column_lists_expected_values() {
        assert_eq!(parse_display_column("allocatedMB").unwrap(), "allocatedMB");
        let err = parse_display_column("bogus").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with(
            "Invalid configuration value: bogus. Expected values: id, user, name"
        ));
    }

    #[test]
    fn test_key_round_trip_through_dotted_name() {
        for key in ConfigKey::all() {
            assert_eq!(ConfigKey::parse(&key.to_string()).unwrap(), key);
        }
        assert_eq!(ConfigKey::all().len(), 2 + MAX_COLUMNS);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        for dotted in [
            "core.bogus",
            "apps.displayColumn.16",
            "apps.displayColumn.x",
            "nosection",
            "ui.hadoopAddress",
        ] {
            assert!(matches!(
                ConfigKey::parse(dotted),
                Err(ConfigError::UnknownKey(_))
            ));
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ConfigKey::HadoopAddress.default_value(), None);
        assert_eq!(
            ConfigKey::QueryInterval.default_value(),
            Some(ConfigValue::Interval(2.0))
        );
        assert_eq!(
            ConfigKey::DisplayColumn(3).default_value(),
            Some(ConfigValue::Column("name"))
        );
        assert_eq!(ConfigKey::DisplayColumn(9).default_value(), None);
    }
}

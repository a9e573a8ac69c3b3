//! CLI configuration management.
//!
//! Loads defaults from a TOML file (`randlab.toml` unless `--config` says
//! otherwise) and applies `RANDLAB_*` environment variable overrides.
//! Command line flags take precedence over both.

use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use randlab_core::engine::MAX_COUNT;
use serde::Deserialize;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation errors, one entry per problem
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Output format for generated sequences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Boxed table of index and value
    #[default]
    Table,
    /// Comma separated values with a header row
    Csv,
    /// JSON document with run metadata
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::Validation(vec![format!(
                "Invalid format '{}'. Supported: table, csv, json",
                s
            )])),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RandlabConfig {
    /// Default sequence length when `--count` is omitted
    pub count: usize,

    /// Upper bound on `--count`
    pub max_count: usize,

    /// Default output format
    pub format: OutputFormat,

    /// Decimal places shown in table and CSV output
    pub precision: u32,

    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for RandlabConfig {
    fn default() -> Self {
        Self {
            count: 10,
            max_count: MAX_COUNT,
            format: OutputFormat::Table,
            precision: 4,
            log_level: "info".to_string(),
        }
    }
}

impl RandlabConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(count) = lookup("RANDLAB_COUNT") {
            match count.parse() {
                Ok(count) => self.count = count,
                Err(_) => errors.push(format!("RANDLAB_COUNT '{}' is not an integer", count)),
            }
        }

        if let Some(max_count) = lookup("RANDLAB_MAX_COUNT") {
            match max_count.parse() {
                Ok(max_count) => self.max_count = max_count,
                Err(_) => errors.push(format!(
                    "RANDLAB_MAX_COUNT '{}' is not an integer",
                    max_count
                )),
            }
        }

        if let Some(format) = lookup("RANDLAB_FORMAT") {
            match format.parse() {
                Ok(format) => self.format = format,
                Err(_) => errors.push(format!("RANDLAB_FORMAT '{}' is not a known format", format)),
            }
        }

        if let Some(precision) = lookup("RANDLAB_PRECISION") {
            match precision.parse() {
                Ok(precision) => self.precision = precision,
                Err(_) => errors.push(format!(
                    "RANDLAB_PRECISION '{}' is not an integer",
                    precision
                )),
            }
        }

        if let Some(log_level) = lookup("RANDLAB_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.max_count == 0 || self.max_count > MAX_COUNT {
            errors.push(format!(
                "max_count {} is outside [1, {}]",
                self.max_count, MAX_COUNT
            ));
        }

        if self.count == 0 || self.count > self.max_count {
            errors.push(format!(
                "count {} is outside [1, max_count = {}]",
                self.count, self.max_count
            ));
        }

        if self.precision > 15 {
            errors.push(format!(
                "precision {} exceeds the 15 significant digits of f64",
                self.precision
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config_validates() {
        let config = RandlabConfig::default();
        assert_eq!(config.count, 10);
        assert_eq!(config.precision, 4);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "count = 25\nformat = \"csv\"").unwrap();

        let config = RandlabConfig::load(file.path()).unwrap();
        assert_eq!(config.count, 25);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.precision, 4);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "count = \"many\"").unwrap();
        assert!(matches!(
            RandlabConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = RandlabConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, RandlabConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = RandlabConfig::default()
            .with_overrides(lookup(&[
                ("RANDLAB_COUNT", "50"),
                ("RANDLAB_FORMAT", "json"),
                ("RANDLAB_LOG_LEVEL", "debug"),
            ]))
            .unwrap();
        assert_eq!(config.count, 50);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_bad_overrides_are_collected() {
        let result = RandlabConfig::default().with_overrides(lookup(&[
            ("RANDLAB_COUNT", "ten"),
            ("RANDLAB_PRECISION", "-1"),
        ]));
        match result {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = RandlabConfig::default();
        config.count = 20_000;
        config.log_level = "loud".to_string();

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("count")));
                assert!(errors.iter().any(|e| e.contains("log_level")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}

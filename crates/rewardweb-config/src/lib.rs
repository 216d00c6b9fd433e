//! Configuration management for rewardweb
//!
//! This module handles loading, validation, and management of
//! rewardweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigErrorCode};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

/// Where transactions are fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// JSON document(s) on disk, `data.path` may be a glob
    File,
    /// Seeded in-process generator
    Sample,
}

impl Default for SourceKind {
    fn default() -> Self {
        SourceKind::File
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(SourceKind::File),
            "sample" => Ok(SourceKind::Sample),
            _ => Err(format!("Invalid data source: {}", s)),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::File => write!(f, "file"),
            SourceKind::Sample => write!(f, "sample"),
        }
    }
}

/// Transaction data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Source kind
    #[serde(default)]
    pub source: SourceKind,
    /// Path (or glob pattern) of the transactions document
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Fail the whole load on a record with an unreadable date
    #[serde(default)]
    pub strict: bool,
    /// Seed for the sample generator
    #[serde(default = "default_sample_seed")]
    pub sample_seed: u64,
    /// Number of generated sample transactions
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            path: default_data_path(),
            strict: false,
            sample_seed: default_sample_seed(),
            sample_size: default_sample_size(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data/transactions.json")
}

fn default_sample_seed() -> u64 {
    42
}

fn default_sample_size() -> usize {
    25
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Rows per table page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Number of page links shown by the pager
    #[serde(default = "default_page_window")]
    pub page_window: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_window: default_page_window(),
        }
    }
}

fn default_page_size() -> usize {
    5
}

fn default_page_window() -> usize {
    5
}

/// Which transaction set the total rewards view sums over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalsMode {
    /// Re-summed from the name/date filtered monthly rows
    FilteredWindow,
    /// Summed over every loaded transaction
    AllTime,
}

impl Default for TotalsMode {
    fn default() -> Self {
        TotalsMode::FilteredWindow
    }
}

impl std::str::FromStr for TotalsMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "filtered_window" => Ok(TotalsMode::FilteredWindow),
            "all_time" => Ok(TotalsMode::AllTime),
            _ => Err(format!("Invalid totals mode: {}", s)),
        }
    }
}

impl std::fmt::Display for TotalsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TotalsMode::FilteredWindow => write!(f, "filtered_window"),
            TotalsMode::AllTime => write!(f, "all_time"),
        }
    }
}

/// Rewards settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RewardsConfig {
    #[serde(default)]
    pub totals_mode: TotalsMode,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Transaction data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Rewards settings
    #[serde(default)]
    pub rewards: RewardsConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                path: path.display().to_string(),
                source: e,
            },
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.pagination.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_size".to_string(),
                reason: "Page size must be greater than 0".to_string(),
            });
        }

        if self.pagination.page_window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_window".to_string(),
                reason: "Page window must be greater than 0".to_string(),
            });
        }

        if self.data.source == SourceKind::Sample && self.data.sample_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "data.sample_size".to_string(),
                reason: "Sample size must be greater than 0".to_string(),
            });
        }

        if self.log_level().is_none() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!(
                    "Invalid log level: {} (expected one of {})",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        Ok(())
    }

    /// Normalized log level, `None` if unrecognized
    pub fn log_level(&self) -> Option<&'static str> {
        let wanted = self.logging.level.trim().to_lowercase();
        LOG_LEVELS.iter().copied().find(|level| *level == wanted)
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.server.port, 8082);
        assert_eq!(config.data.source, SourceKind::File);
        assert_eq!(config.pagination.page_size, 5);
        assert_eq!(config.pagination.page_window, 5);
        assert_eq!(config.rewards.totals_mode, TotalsMode::FilteredWindow);
        assert_eq!(config.log_level(), Some("info"));
    }

    #[test]
    fn test_default_template_is_valid() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.pagination.page_size, 5);
    }

    #[test]
    fn test_partial_sections() {
        let yaml = "data:\n  source: sample\n  sample_seed: 7\nrewards:\n  totals_mode: all_time\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.data.source, SourceKind::Sample);
        assert_eq!(config.data.sample_seed, 7);
        assert_eq!(config.data.sample_size, 25);
        assert_eq!(config.rewards.totals_mode, TotalsMode::AllTime);
    }

    #[test]
    fn test_invalid_log_level_fails_fast() {
        let err = Config::from_yaml("logging:\n  level: verbose\n").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::InvalidValue);
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let config = Config::from_yaml("logging:\n  level: WARN\n").unwrap();
        assert_eq!(config.log_level(), Some("warn"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = Config::from_yaml("pagination:\n  page_size: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "pagination.page_size"));
    }

    #[test]
    fn test_unknown_source_is_invalid_yaml() {
        let err = Config::from_yaml("data:\n  source: ftp\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/rewardweb.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_totals_mode_from_str() {
        assert_eq!("all-time".parse::<TotalsMode>().unwrap(), TotalsMode::AllTime);
        assert_eq!(
            "Filtered_Window".parse::<TotalsMode>().unwrap(),
            TotalsMode::FilteredWindow
        );
        assert!("weekly".parse::<TotalsMode>().is_err());
        assert_eq!(TotalsMode::AllTime.to_string(), "all_time");
    }
}

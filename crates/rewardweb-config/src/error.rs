//! Error types for rewardweb-config

use thiserror::Error;

/// Stable code printed as `error[CODE]` when the binary refuses to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    FileNotFound,
    InvalidYaml,
    InvalidValue,
    IoError,
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ConfigErrorCode::InvalidYaml => write!(f, "INVALID_YAML"),
            ConfigErrorCode::InvalidValue => write!(f, "INVALID_VALUE"),
            ConfigErrorCode::IoError => write!(f, "IO_ERROR"),
        }
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid YAML format: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Cannot read {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::InvalidYaml(_) => ConfigErrorCode::InvalidYaml,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
            ConfigError::IoError { .. } => ConfigErrorCode::IoError,
        }
    }

    /// `help:` lines shown under the error
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            ConfigError::FileNotFound { .. } => vec![
                "Check the path given to --config.",
                "Run with --print-config to get a starting config file.",
            ],
            ConfigError::InvalidYaml(_) | ConfigError::InvalidValue { .. } => {
                vec!["Compare your file against the output of --print-config."]
            }
            ConfigError::IoError { .. } => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::InvalidValue {
            field: "logging.level".to_string(),
            reason: "unknown log level 'loud'".to_string(),
        };
        assert_eq!(err.code().to_string(), "INVALID_VALUE");
        assert_eq!(err.to_string(), "Invalid value for logging.level: unknown log level 'loud'");
        assert_eq!(err.suggestions().len(), 1);
    }

    #[test]
    fn test_missing_file_suggests_print_config() {
        let err = ConfigError::FileNotFound {
            path: "nope.yaml".to_string(),
        };
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("--print-config")));
    }
}

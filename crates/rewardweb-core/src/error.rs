//! Error types for rewardweb-core
//!
//! Error codes, detailed messages and suggestions for everything that can go
//! wrong between a fetch completing and a table being rendered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No load has been started yet
    NotLoaded,
    /// A load is in flight
    Loading,
    /// Source unreachable or returned a failure
    FetchFailure,
    /// A record could not be ingested
    MalformedRecord,
    /// Filter input could not be understood
    InvalidFilter,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::Loading => write!(f, "LOADING"),
            ErrorCode::FetchFailure => write!(f, "FETCH_FAILURE"),
            ErrorCode::MalformedRecord => write!(f, "MALFORMED_RECORD"),
            ErrorCode::InvalidFilter => write!(f, "INVALID_FILTER"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Offending record id, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
            record: None,
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    pub fn with_record(mut self, id: String) -> Self {
        self.record = Some(id);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if let Some(ref record) = self.record {
            write!(f, "\nRecord: {}", record)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for rewardweb-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Rewards data not loaded")]
    NotLoaded,

    #[error("Rewards data is loading")]
    Loading,

    #[error("{message}")]
    FetchFailure { message: String },

    #[error("Malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("Invalid filter {field}: {value}")]
    InvalidFilter { field: String, value: String },
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::Loading => ErrorCode::Loading,
            CoreError::FetchFailure { .. } => ErrorCode::FetchFailure,
            CoreError::MalformedRecord { .. } => ErrorCode::MalformedRecord,
            CoreError::InvalidFilter { .. } => ErrorCode::InvalidFilter,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoaded => ErrorSeverity::Warning,
            CoreError::Loading => ErrorSeverity::Info,
            CoreError::FetchFailure { .. } => ErrorSeverity::Error,
            CoreError::MalformedRecord { .. } => ErrorSeverity::Error,
            CoreError::InvalidFilter { .. } => ErrorSeverity::Warning,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::NotLoaded | CoreError::Loading => {
                details = details.with_suggestion("Wait for the load to finish.".to_string());
            }
            CoreError::FetchFailure { .. } => {
                details = details
                    .with_suggestion("Check that the data source is reachable.".to_string())
                    .with_suggestion("Use POST /api/reload to try again.".to_string());
            }
            CoreError::MalformedRecord { id, reason } => {
                details = details
                    .with_record(id.clone())
                    .with_detail(serde_json::json!({ "reason": reason }))
                    .with_suggestion("Dates must start with YYYY-MM-DD.".to_string())
                    .with_suggestion(
                        "Set data.strict to false to skip bad records instead.".to_string(),
                    );
            }
            CoreError::InvalidFilter { field, .. } => {
                details = details
                    .with_detail(serde_json::json!({ "field": field }))
                    .with_suggestion("Use YYYY-MM or YYYY-MM-DD for date bounds.".to_string());
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Load generation, when the error belongs to a load
    pub generation: Option<u64>,
    pub data: serde_json::Value,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            generation: None,
            data: serde_json::json!({}),
        }
    }

    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = Some(generation);
        self
    }

    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        log::error!(
            target: "rewardweb::error",
            "ERROR [{}] {} - Operation: {} - Generation: {:?}",
            error.code(),
            error.to_details(),
            context.operation,
            context.generation
        );
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "rewardweb::error",
            "WARNING: {} - Operation: {} - Generation: {:?} {}",
            message,
            context.operation,
            context.generation,
            context.data
        );
    }
}

// ==================== Tests ====================

//! Error types for rewardweb-source

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("No transaction files match {pattern}")]
    NotFound { pattern: String },

    #[error("Invalid path pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Malformed document {location}: {message}")]
    MalformedDocument { location: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

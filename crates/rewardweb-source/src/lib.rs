//! Transaction sources for rewardweb
//!
//! A source is an opaque collaborator that yields raw purchase records.
//! [`fetch_transactions`] is the loader boundary: whatever goes wrong inside a
//! source, callers get back a [`FetchResponse`] instead of an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod error;
pub mod file;
pub mod sample;
pub mod types;

pub use error::SourceError;
pub use file::JsonFileSource;
pub use sample::SampleSource;
pub use types::{Customer, CustomerId, Transaction, TransactionDocument};

// ==================== Source Trait ====================

/// Source reference type
pub type SourceRef = Arc<dyn TransactionSource>;

/// Anything that can produce the list of raw transactions
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch every transaction the source currently holds
    async fn fetch(&self) -> Result<Vec<Transaction>, SourceError>;

    /// Short label for logs
    fn describe(&self) -> String;
}

// ==================== Loader Boundary ====================

/// Outcome of a fetch, in the shape presented to the rest of the system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Transaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchResponse {
    pub fn ok(data: Vec<Transaction>) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Fetch from `source`, normalizing any failure into `success: false`
pub async fn fetch_transactions(source: &dyn TransactionSource) -> FetchResponse {
    log::info!("Fetching transactions from {}", source.describe());

    match source.fetch().await {
        Ok(data) => {
            log::info!("Fetched {} transactions", data.len());
            FetchResponse::ok(data)
        }
        Err(e) => {
            log::error!(target: "rewardweb::source", "Fetch from {} failed: {}", source.describe(), e);
            FetchResponse::failure(e.to_string())
        }
    }
}

//! JSON document source

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::types::{Transaction, TransactionDocument};
use crate::TransactionSource;

/// Reads `{ "transactions": [...] }` documents from disk.
///
/// The configured path may be a glob; every matching file is read in sorted
/// order and the transaction arrays are concatenated.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn resolve(&self) -> Result<Vec<PathBuf>, SourceError> {
        let pattern = self.path.to_string_lossy().to_string();

        if !is_glob(&pattern) {
            return Ok(vec![self.path.clone()]);
        }

        let entries = glob::glob(&pattern).map_err(|e| SourceError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;

        let mut files: Vec<PathBuf> = entries.flatten().filter(|p| p.is_file()).collect();
        files.sort();

        if files.is_empty() {
            return Err(SourceError::NotFound { pattern });
        }
        Ok(files)
    }

    async fn read_document(path: &Path) -> Result<TransactionDocument, SourceError> {
        let content = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&content).map_err(|e| SourceError::MalformedDocument {
            location: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

#[async_trait]
impl TransactionSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<Transaction>, SourceError> {
        let mut transactions = Vec::new();

        for file in self.resolve()? {
            let document = Self::read_document(&file).await?;
            log::debug!(
                "Read {} transactions from {}",
                document.transactions.len(),
                file.display()
            );
            transactions.extend(document.transactions);
        }

        Ok(transactions)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

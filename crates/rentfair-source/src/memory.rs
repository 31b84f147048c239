//! In-memory source, typically loaded from a JSON export of one district.

use std::path::Path;

use async_trait::async_trait;
use rentfair_core::Transaction;
use tracing::{debug, info};

use crate::{Region, SourceError, TransactionSource, YearMonth};

/// Serves a fixed set of records, bucketed by contract month.
///
/// The records are assumed to belong to a single district, so the requested
/// region is not used for filtering.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<Transaction>,
}

impl MemorySource {
    pub fn new(records: Vec<Transaction>) -> Self {
        Self { records }
    }

    /// Load a JSON array of transactions.
    pub fn from_json_file(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<Transaction> = serde_json::from_str(&text)?;
        info!(path = %path.display(), count = records.len(), "loaded transactions");
        Ok(Self::new(records))
    }
}

#[async_trait]
impl TransactionSource for MemorySource {
    async fn fetch_month(
        &self,
        region: &Region,
        month: YearMonth,
    ) -> Result<Vec<Transaction>, SourceError> {
        let records: Vec<Transaction> = self
            .records
            .iter()
            .filter(|t| month.contains(t.date))
            .cloned()
            .collect();
        debug!(%region, %month, count = records.len(), "served from memory");
        Ok(records)
    }
}

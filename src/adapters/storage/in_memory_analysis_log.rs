//! In-Memory Analysis Log Adapter
//!
//! Keeps appended records in memory. Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::call::LogRecord;
use crate::ports::{AnalysisLog, AnalysisLogError};

/// In-memory analysis log
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnalysisLog {
    records: Arc<RwLock<Vec<LogRecord>>>,
}

impl InMemoryAnalysisLog {
    /// Create a new, empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records, in insertion order
    pub async fn records(&self) -> Vec<LogRecord> {
        self.records.read().await.clone()
    }

    /// Number of appended records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether nothing has been appended yet
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl AnalysisLog for InMemoryAnalysisLog {
    async fn append(&self, record: &LogRecord) -> Result<(), AnalysisLogError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }
}

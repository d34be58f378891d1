//! Analysis Log Port - append-only record of analyzed transcripts.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::call::LogRecord;

/// Port for persisting analysis records.
///
/// Implementations only ever append. Records are never rewritten, reordered
/// or deleted, and duplicates are allowed.
#[async_trait]
pub trait AnalysisLog: Send + Sync {
    /// Appends one record to the end of the log.
    async fn append(&self, record: &LogRecord) -> Result<(), AnalysisLogError>;
}

/// Errors from analysis log operations.
#[derive(Debug, Error)]
pub enum AnalysisLogError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}

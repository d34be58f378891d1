//! CSV Analysis Log Adapter
//!
//! Appends one row per analyzed transcript to a CSV file. The header row is
//! written when the file is first created (or found empty). Existing content
//! is never rewritten or truncated.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::call::LogRecord;
use crate::ports::{AnalysisLog, AnalysisLogError};

/// Column names of the log file.
pub const LOG_HEADER: [&str; 3] = ["Transcript", "Summary", "Sentiment"];

/// CSV-file-backed analysis log.
///
/// Appends from concurrent requests are serialized through an async mutex so
/// rows never interleave. The lock is per instance; share one instance (it is
/// cheap to clone) rather than opening the same path twice.
#[derive(Debug, Clone)]
pub struct CsvAnalysisLog {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvAnalysisLog {
    /// Create a log writing to the given file path
    ///
    /// # Example
    /// ```ignore
    /// let log = CsvAnalysisLog::new("call_analysis.csv");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the underlying CSV file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists
    async fn ensure_parent_dir(&self) -> Result<(), AnalysisLogError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| AnalysisLogError::IoError(e.to_string())),
            _ => Ok(()),
        }
    }
}

/// Encodes the record (and optionally the header) as CSV bytes.
fn encode_rows(record: &LogRecord, with_header: bool) -> Result<Vec<u8>, AnalysisLogError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if with_header {
        writer
            .write_record(LOG_HEADER)
            .map_err(|e| AnalysisLogError::SerializationFailed(e.to_string()))?;
    }

    writer
        .write_record([
            record.transcript.as_str(),
            record.summary.as_str(),
            record.sentiment.as_str(),
        ])
        .map_err(|e| AnalysisLogError::SerializationFailed(e.to_string()))?;

    writer
        .into_inner()
        .map_err(|e| AnalysisLogError::SerializationFailed(e.to_string()))
}

#[async_trait]
impl AnalysisLog for CsvAnalysisLog {
    async fn append(&self, record: &LogRecord) -> Result<(), AnalysisLogError> {
        let _guard = self.write_lock.lock().await;

        self.ensure_parent_dir().await?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| AnalysisLogError::IoError(e.to_string()))?;

        let is_new = file
            .metadata()
            .await
            .map_err(|e| AnalysisLogError::IoError(e.to_string()))?
            .len()
            == 0;

        let bytes = encode_rows(record, is_new)?;

        file.write_all(&bytes)
            .await
            .map_err(|e| AnalysisLogError::IoError(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| AnalysisLogError::IoError(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), header_written = is_new, "Appended analysis record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::call::Sentiment;
    use tempfile::TempDir;

    fn record(transcript: &str, summary: &str, sentiment: Sentiment) -> LogRecord {
        LogRecord {
            transcript: transcript.to_string(),
            summary: summary.to_string(),
            sentiment,
        }
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[tokio::test]
    async fn first_append_writes_header_then_row() {
        let dir = TempDir::new().unwrap();
        let log = CsvAnalysisLog::new(dir.path().join("calls.csv"));

        log.append(&record("hello", "Greeting.", Sentiment::Neutral))
            .await
            .unwrap();

        let rows = read_rows(log.path());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Transcript", "Summary", "Sentiment"]);
        assert_eq!(rows[1], vec!["hello", "Greeting.", "Neutral"]);
    }

    #[tokio::test]
    async fn later_appends_do_not_repeat_header() {
        let dir = TempDir::new().unwrap();
        let log = CsvAnalysisLog::new(dir.path().join("calls.csv"));

        log.append(&record("a", "A.", Sentiment::Positive)).await.unwrap();
        log.append(&record("b", "B.", Sentiment::Negative)).await.unwrap();
        log.append(&record("a", "A.", Sentiment::Positive)).await.unwrap();

        let rows = read_rows(log.path());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1][0], "a");
        assert_eq!(rows[2][0], "b");
        assert_eq!(rows[3], rows[1]);
    }

    #[tokio::test]
    async fn multiline_and_quoted_text_stays_one_record() {
        let dir = TempDir::new().unwrap();
        let log = CsvAnalysisLog::new(dir.path().join("calls.csv"));
        let transcript = "Agent: Hello, how can I help?\nCaller: My \"premium\" plan, it broke.";

        log.append(&record(transcript, "Plan, broken.", Sentiment::Negative))
            .await
            .unwrap();

        let rows = read_rows(log.path());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], transcript);
        assert_eq!(rows[1][1], "Plan, broken.");
    }

    #[tokio::test]
    async fn existing_content_is_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("calls.csv");
        std::fs::write(&path, "Transcript,Summary,Sentiment\nold,Old.,Positive\n").unwrap();
        let log = CsvAnalysisLog::new(&path);

        log.append(&record("new", "New.", Sentiment::Neutral)).await.unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["old", "Old.", "Positive"]);
        assert_eq!(rows[2], vec!["new", "New.", "Neutral"]);
    }

    #[tokio::test]
    async fn missing_parent_directories_are_created() {
        let dir = TempDir::new().unwrap();
        let log = CsvAnalysisLog::new(dir.path().join("nested/logs/calls.csv"));

        log.append(&record("x", "X.", Sentiment::Neutral)).await.unwrap();

        assert!(log.path().exists());
    }

    #[tokio::test]
    async fn concurrent_appends_do_not_interleave() {
        let dir = TempDir::new().unwrap();
        let log = CsvAnalysisLog::new(dir.path().join("calls.csv"));

        let mut tasks = Vec::new();
        for i in 0..25 {
            let log = log.clone();
            tasks.push(tokio::spawn(async move {
                let transcript = format!("caller {}\nsecond line {}", i, "x".repeat(512));
                log.append(&record(&transcript, "Concurrent.", Sentiment::Neutral))
                    .await
                    .unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let rows = read_rows(log.path());
        assert_eq!(rows.len(), 26);
        assert_eq!(rows[0], vec!["Transcript", "Summary", "Sentiment"]);
        assert!(rows[1..]
            .iter()
            .all(|row| row.len() == 3 && row[0].starts_with("caller ") && row[1] == "Concurrent."));
    }
}

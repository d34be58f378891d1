//! Analysis outcome and the log record derived from it.

use serde::Serialize;

use super::{Sentiment, Transcript};

/// Summary used when the model reply yields no usable text.
pub const SUMMARY_PLACEHOLDER: &str = "No summary produced.";

/// Structured outcome of analyzing one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    summary: String,
    sentiment: Sentiment,
}

impl AnalysisResult {
    /// Creates a result, trimming the summary and substituting the
    /// placeholder when nothing usable remains.
    pub fn new(summary: Option<&str>, sentiment: Sentiment) -> Self {
        let summary = summary
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(SUMMARY_PLACEHOLDER)
            .to_string();

        Self { summary, sentiment }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }
}

/// One row of the append-only analysis log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub transcript: String,
    pub summary: String,
    pub sentiment: Sentiment,
}

impl LogRecord {
    /// Builds the record persisted for an analyzed transcript.
    pub fn new(transcript: &Transcript, result: &AnalysisResult) -> Self {
        Self {
            transcript: transcript.as_str().to_string(),
            summary: result.summary().to_string(),
            sentiment: result.sentiment(),
        }
    }
}

//! HTTP DTOs for transcript analysis.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::call::AnalyzeTranscriptResult;
use crate::domain::call::Sentiment;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Transcript submission, from either a JSON body or a form field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub transcript: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Analysis outcome returned to JSON callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub transcript: String,
    pub summary: String,
    pub sentiment: Sentiment,
}

impl From<&AnalyzeTranscriptResult> for AnalyzeResponse {
    fn from(result: &AnalyzeTranscriptResult) -> Self {
        Self {
            transcript: result.transcript.as_str().to_string(),
            summary: result.analysis.summary().to_string(),
            sentiment: result.analysis.sentiment(),
        }
    }
}

/// Error body for server-side failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

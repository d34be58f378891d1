//! Call analysis domain.
//!
//! - `Transcript` - validated caller transcript
//! - `Sentiment` - closed three-way sentiment with normalization
//! - `AnalysisResult` / `LogRecord` - outcome of one analysis
//! - `extraction` - reply parsing chain (JSON object, then heuristics)
//! - `prompts` - instruction text sent to the model

pub mod extraction;
pub mod prompts;
mod result;
mod sentiment;
mod transcript;

pub use extraction::{extract_json_object, fallback_parse, ReplyFields};
pub use result::{AnalysisResult, LogRecord, SUMMARY_PLACEHOLDER};
pub use sentiment::Sentiment;
pub use transcript::Transcript;

//! Call analysis handlers.
//!
//! - `ModelGateway` - one completion per transcript, reply interpretation
//! - `AnalyzeTranscriptHandler` - validate, analyze, record

mod analyze_transcript;
mod model_gateway;

pub use analyze_transcript::{
    AnalyzeTranscriptCommand, AnalyzeTranscriptError, AnalyzeTranscriptHandler,
    AnalyzeTranscriptResult,
};
pub use model_gateway::{interpret_reply, GatewayError, GatewaySettings, ModelGateway};

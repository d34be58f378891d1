//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - hosted chat-completion model
//! - `AnalysisLog` - append-only record log

mod ai_provider;
mod analysis_log;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
    ProviderInfo, TokenUsage,
};
pub use analysis_log::{AnalysisLog, AnalysisLogError};

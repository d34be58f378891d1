//! Mock AI Provider for testing.
//!
//! Replays scripted replies or errors without calling a hosted model.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response(r#"{"summary":"Refund request.","sentiment":"Negative"}"#)
//!     .with_error(AIError::network("connection refused"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo, TokenUsage,
};

const MOCK_MODEL: &str = "mock-model";

/// Reply used once the script runs out.
const DEFAULT_REPLY: &str = r#"{"summary":"Mock summary.","sentiment":"Neutral"}"#;

/// Scripted completion provider.
///
/// Each call pops the next scripted outcome; an exhausted script answers
/// with [`DEFAULT_REPLY`]. Clones share the script and the call history.
#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    script: Arc<Mutex<VecDeque<Result<String, AIError>>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(content.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: AIError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Requests received so far, oldest first.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let outcome = {
            self.calls.lock().unwrap().push(request);
            self.script.lock().unwrap().pop_front()
        };

        let content = outcome.unwrap_or_else(|| Ok(DEFAULT_REPLY.to_string()))?;

        Ok(CompletionResponse {
            content,
            usage: TokenUsage::new(10, 20),
            model: MOCK_MODEL.to_string(),
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", MOCK_MODEL)
    }
}

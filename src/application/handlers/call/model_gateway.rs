//! ModelGateway - single outbound call to the hosted model.
//!
//! Builds the fixed prompt pair, issues one completion, and reduces the
//! reply to an [`AnalysisResult`]. Transport and API failures come back as
//! [`GatewayError`]; reply-shape problems never do.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::call::{
    extract_json_object, fallback_parse, prompts, AnalysisResult, ReplyFields, Sentiment,
    Transcript,
};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole};

/// Decoding settings applied to every analysis request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatewaySettings {
    /// Upper bound on reply length, in tokens.
    pub max_tokens: u32,
    /// Sampling temperature; 0.0 for deterministic output.
    pub temperature: f32,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.0,
        }
    }
}

/// Failure reaching or reading from the hosted model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
}

impl From<AIError> for GatewayError {
    fn from(err: AIError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Gateway to the transcript-analysis model.
pub struct ModelGateway {
    provider: Arc<dyn AIProvider>,
    settings: GatewaySettings,
}

impl ModelGateway {
    pub fn new(provider: Arc<dyn AIProvider>, settings: GatewaySettings) -> Self {
        Self { provider, settings }
    }

    /// Analyzes one transcript with a single, non-retried model call.
    pub async fn analyze(&self, transcript: &Transcript) -> Result<AnalysisResult, GatewayError> {
        let request = self.build_request(transcript);

        let response = self.provider.complete(request).await?;

        tracing::debug!(
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            total_tokens = response.usage.total_tokens,
            "Model reply received"
        );

        Ok(interpret_reply(&response.content))
    }

    fn build_request(&self, transcript: &Transcript) -> CompletionRequest {
        CompletionRequest::new()
            .with_system_prompt(prompts::ANALYSIS_SYSTEM_PROMPT)
            .with_message(
                MessageRole::User,
                prompts::analysis_user_prompt(transcript.as_str()),
            )
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens)
    }
}

/// Reduces raw reply text to a normalized result.
///
/// Structured extraction is tried first; the heuristic parser covers any
/// miss. Sentiment is normalized and the summary defaulted regardless of
/// which path produced them.
pub fn interpret_reply(raw: &str) -> AnalysisResult {
    let fields = extract_json_object(raw)
        .map(|object| ReplyFields::from_object(&object))
        .unwrap_or_else(|| {
            tracing::debug!("No JSON object in model reply, using heuristic parse");
            fallback_parse(raw)
        });

    let sentiment = Sentiment::normalize(fields.sentiment.as_deref());
    AnalysisResult::new(fields.summary.as_deref(), sentiment)
}

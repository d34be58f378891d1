//! AnalyzeTranscript command handler.
//!
//! Validates the transcript, runs it through the model gateway, and appends
//! the outcome to the analysis log. Nothing is logged when validation or the
//! gateway fails.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::call::{AnalysisResult, LogRecord, Transcript};
use crate::domain::foundation::ValidationError;
use crate::ports::{AnalysisLog, AnalysisLogError};

use super::model_gateway::{GatewayError, ModelGateway};

/// Command to analyze one submitted transcript.
#[derive(Debug, Clone)]
pub struct AnalyzeTranscriptCommand {
    /// Transcript text exactly as submitted.
    pub transcript: String,
}

impl AnalyzeTranscriptCommand {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeTranscriptResult {
    pub transcript: Transcript,
    pub analysis: AnalysisResult,
}

/// Errors that can occur when analyzing a transcript.
#[derive(Debug, Error)]
pub enum AnalyzeTranscriptError {
    /// Transcript is empty or whitespace only.
    #[error("Please provide a non-empty transcript.")]
    EmptyTranscript(#[from] ValidationError),

    /// The model could not be reached or answered with an error.
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    /// The analysis succeeded but could not be recorded.
    #[error("Failed to record analysis: {0}")]
    LogWrite(#[from] AnalysisLogError),
}

/// Handler for transcript analysis.
pub struct AnalyzeTranscriptHandler {
    gateway: ModelGateway,
    log: Arc<dyn AnalysisLog>,
}

impl AnalyzeTranscriptHandler {
    pub fn new(gateway: ModelGateway, log: Arc<dyn AnalysisLog>) -> Self {
        Self { gateway, log }
    }

    pub async fn handle(
        &self,
        cmd: AnalyzeTranscriptCommand,
    ) -> Result<AnalyzeTranscriptResult, AnalyzeTranscriptError> {
        let transcript = Transcript::new(cmd.transcript)?;

        let analysis = self.gateway.analyze(&transcript).await.map_err(|e| {
            tracing::error!(error = %e, "Transcript analysis failed");
            e
        })?;

        tracing::info!(
            transcript = %transcript,
            summary = %analysis.summary(),
            sentiment = %analysis.sentiment(),
            "Transcript analyzed"
        );

        self.log
            .append(&LogRecord::new(&transcript, &analysis))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to append analysis record");
                e
            })?;

        Ok(AnalyzeTranscriptResult {
            transcript,
            analysis,
        })
    }
}

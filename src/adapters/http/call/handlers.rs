//! HTTP handlers for transcript analysis.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Query, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};

use crate::application::handlers::call::{
    AnalyzeTranscriptCommand, AnalyzeTranscriptError, AnalyzeTranscriptHandler,
};

use super::dto::{AnalyzeRequest, AnalyzeResponse, ErrorResponse};
use super::page::render_page;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CallAppState {
    analyze_handler: Arc<AnalyzeTranscriptHandler>,
}

impl CallAppState {
    pub fn new(analyze_handler: Arc<AnalyzeTranscriptHandler>) -> Self {
        Self { analyze_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Extractors
// ════════════════════════════════════════════════════════════════════════════

/// A transcript submission, remembering how it arrived.
///
/// JSON bodies are decoded strictly. URL-encoded and multipart bodies are
/// read as forms; when a form carries no transcript the `transcript` query
/// parameter is used instead. Undecodable bodies are rejected with 400.
#[derive(Debug)]
pub enum TranscriptSubmission {
    Json(AnalyzeRequest),
    Form(AnalyzeRequest),
}

impl TranscriptSubmission {
    fn into_parts(self) -> (AnalyzeRequest, bool) {
        match self {
            TranscriptSubmission::Json(req) => (req, true),
            TranscriptSubmission::Form(req) => (req, false),
        }
    }
}

/// How a request body is encoded, from its content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyEncoding {
    Json,
    UrlEncoded,
    Multipart,
    Other,
}

#[async_trait]
impl<S> FromRequest<S> for TranscriptSubmission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let encoding = body_encoding(req.headers());

        if encoding == BodyEncoding::Json {
            return Json::<AnalyzeRequest>::from_request(req, state)
                .await
                .map(|Json(body)| TranscriptSubmission::Json(body))
                .map_err(|rejection| bad_request("Invalid JSON body", rejection.body_text()));
        }

        let from_query = Query::<AnalyzeRequest>::try_from_uri(req.uri())
            .ok()
            .and_then(|Query(query)| query.transcript);

        let from_body = match encoding {
            BodyEncoding::UrlEncoded => Form::<AnalyzeRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body.transcript)
                .map_err(|rejection| bad_request("Invalid form body", rejection.body_text()))?,
            BodyEncoding::Multipart => multipart_transcript(req, state).await?,
            BodyEncoding::Json | BodyEncoding::Other => None,
        };

        let transcript = from_body.filter(|text| !text.is_empty()).or(from_query);
        Ok(TranscriptSubmission::Form(AnalyzeRequest { transcript }))
    }
}

/// Reads the `transcript` field of a multipart body, if present.
async fn multipart_transcript<S>(req: Request, state: &S) -> Result<Option<String>, Response>
where
    S: Send + Sync,
{
    let mut multipart = Multipart::from_request(req, state)
        .await
        .map_err(|rejection| bad_request("Invalid multipart body", rejection.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request("Invalid multipart body", e.body_text()))?
    {
        if field.name() == Some("transcript") {
            let text = field
                .text()
                .await
                .map_err(|e| bad_request("Invalid multipart body", e.body_text()))?;
            return Ok(Some(text));
        }
    }

    Ok(None)
}

fn bad_request(context: &str, detail: String) -> Response {
    (StatusCode::BAD_REQUEST, format!("{}: {}", context, detail)).into_response()
}

fn body_encoding(headers: &HeaderMap) -> BodyEncoding {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return BodyEncoding::Other;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "application/json" => BodyEncoding::Json,
        "application/x-www-form-urlencoded" => BodyEncoding::UrlEncoded,
        "multipart/form-data" => BodyEncoding::Multipart,
        m if m.starts_with("application/") && m.ends_with("+json") => BodyEncoding::Json,
        _ => BodyEncoding::Other,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET / - Transcript submission form
pub async fn index() -> Html<String> {
    Html(render_page(None))
}

/// POST /analyze - Analyze a transcript
pub async fn analyze(
    State(state): State<CallAppState>,
    submission: TranscriptSubmission,
) -> Response {
    let (request, wants_json) = submission.into_parts();
    let cmd = AnalyzeTranscriptCommand::new(request.transcript.unwrap_or_default());

    match state.analyze_handler.handle(cmd).await {
        Ok(result) => {
            let response = AnalyzeResponse::from(&result);
            if wants_json {
                (StatusCode::OK, Json(response)).into_response()
            } else {
                (StatusCode::OK, Html(render_page(Some(&response)))).into_response()
            }
        }
        Err(e) => handle_analyze_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_analyze_error(error: AnalyzeTranscriptError) -> Response {
    match error {
        AnalyzeTranscriptError::EmptyTranscript(_) => {
            (StatusCode::BAD_REQUEST, error.to_string()).into_response()
        }
        AnalyzeTranscriptError::Gateway(_) | AnalyzeTranscriptError::LogWrite(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(error.to_string())),
        )
            .into_response(),
    }
}

//! HTTP routes for transcript analysis.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{analyze, index, CallAppState};

/// Create the transcript analysis router.
///
/// # Routes
/// - `GET /` - Submission form
/// - `POST /analyze` - Analyze a transcript (JSON or form body)
pub fn call_routes() -> Router<CallAppState> {
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze))
}

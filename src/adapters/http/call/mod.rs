//! HTTP adapter for transcript analysis endpoints.

mod dto;
mod handlers;
mod page;
mod routes;

pub use dto::{AnalyzeRequest, AnalyzeResponse, ErrorResponse};
pub use handlers::{CallAppState, TranscriptSubmission};
pub use page::{escape_html, render_page};
pub use routes::call_routes;

//! HTTP adapters - REST and HTML endpoint implementations.
//!
//! Each feature has its own HTTP adapter; `app_router` assembles them with
//! the shared middleware stack.

pub mod call;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::ServerConfig;

pub use call::{call_routes, CallAppState};

/// Build the full application router.
///
/// Layers, outermost first: request tracing, CORS, body size limit.
pub fn app_router(state: CallAppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(call_routes())
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}

//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Span, info, info_span, warn};

/// Logs method, path, status and duration of every request.
///
/// Share tokens appear in `/api/share/{token}` paths, so those are logged
/// without the token segment.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = loggable_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        warn!(%method, %path, status, duration_ms, "HTTP request");
    } else {
        info!(%method, %path, status, duration_ms, "HTTP request");
    }

    response
}

/// Span for the HTTP trace layer. Carries the method and the redacted path,
/// never the raw URI or its query string.
pub(crate) fn http_span(request: &Request) -> Span {
    info_span!(
        "http_request",
        method = %request.method(),
        path = %loggable_path(request.uri().path()),
    )
}

pub(crate) fn loggable_path(path: &str) -> String {
    match path.strip_prefix("/api/share/") {
        None | Some("event" | "itinerary" | "links") => path.to_string(),
        Some(rest) if rest.contains('/') => path.to_string(),
        Some(_) => "/api/share/{token}".to_string(),
    }
}

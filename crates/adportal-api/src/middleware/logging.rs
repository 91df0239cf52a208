//! Per-request access log.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info, warn};

/// Logs method, path, status and latency once the response is ready.
///
/// The query string is left out: sign-in redirects carry `callbackUrl` there.
/// Health probes are logged at `debug`, server errors at `warn`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(%method, %path, status, latency_ms, "Request failed");
    } else if path.ends_with("/health") {
        debug!(%method, %path, status, latency_ms, "Health probe");
    } else {
        info!(%method, %path, status, latency_ms, "Request handled");
    }

    response
}

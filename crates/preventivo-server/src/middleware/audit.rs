use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

/// Request logging middleware.
///
/// Runs each request inside a span carrying a fresh request id and logs
/// method, path, status and latency once the response is ready.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();
    let span = tracing::info_span!("request", request_id = %Uuid::new_v4());
    let started = Instant::now();

    let response = next.run(req).instrument(span.clone()).await;

    let status = response.status().as_u16();
    span.in_scope(|| {
        tracing::info!(
            method = %method,
            path = %uri,
            status = status,
            latency_ms = started.elapsed().as_millis() as u64,
            "api_request"
        );
    });

    response
}

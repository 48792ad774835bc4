//! Per-request access log.

use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::CurrentUser;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Log method, path, trace id, caller, status and latency of every request.
///
/// The trace id is echoed back in the `x-request-id` response header.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let trace_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let mut response = next.run(request).await;

    let user_id = response.extensions().get::<CurrentUser>().map(|user| user.id);
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(%trace_id, %method, %path, ?user_id, status = status.as_u16(), elapsed_ms, "Request failed");
    } else {
        tracing::info!(%trace_id, %method, %path, ?user_id, status = status.as_u16(), elapsed_ms, "Request handled");
    }

    if let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

/// Largest plain-text error body that is carried over as the JSON message.
const MAX_PLAIN_ERROR_BYTES: usize = 16 * 1024;

/// Middleware entry point, mounted with `axum::middleware::from_fn`.
pub async fn enforce_response_shape(request: Request, next: Next) -> Response {
    conform(next.run(request).await).await
}

/// Stamp `Access-Control-Allow-Origin: *` on every response and rewrite
/// non-JSON error responses as `{"error": "<message>"}`.
///
/// The message is the original plain-text body, or the status reason when
/// that body is empty.
pub async fn conform(response: Response) -> Response {
    let (mut parts, body) = response.into_parts();
    parts
        .headers
        .entry(ACCESS_CONTROL_ALLOW_ORIGIN)
        .or_insert(HeaderValue::from_static("*"));

    let is_error = parts.status.is_client_error() || parts.status.is_server_error();
    let is_json = parts
        .headers
        .get(CONTENT_TYPE)
        .is_some_and(|v| v.as_bytes().starts_with(b"application/json"));
    if !is_error || is_json {
        return Response::from_parts(parts, body);
    }

    let text = match axum::body::to_bytes(body, MAX_PLAIN_ERROR_BYTES).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable error body");
            String::new()
        }
    };
    let message = if text.is_empty() {
        parts
            .status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        text
    };

    tracing::debug!(status = %parts.status, %message, "Reshaped error response");

    parts.headers.remove(CONTENT_LENGTH);
    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_parts(parts, Body::from(body))
}

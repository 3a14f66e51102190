//! Request/response logging with redacted credentials

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use tracing::info;

/// Log each request and its completion.
///
/// No span is opened here; `TraceLayer` already owns the request span.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = extract_path(&request);
    let request_id = extract_request_id(&request);
    let headers = loggable_headers(&request);

    info!(
        method = %method,
        path = %path,
        request_id = %request_id,
        headers = %headers,
        "Incoming request"
    );

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = %request_id,
        "Request completed"
    );

    response
}

fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

/// Channel-supplied request id, or a fresh one
fn extract_request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-request-id")
        .or_else(|| request.headers().get("ms-cv"))
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

fn loggable_headers(request: &Request<Body>) -> String {
    request
        .headers()
        .iter()
        .filter(|(name, _)| should_log_header(name.as_str()))
        .map(|(name, value)| {
            let value = if is_sensitive_header(name.as_str()) {
                "[REDACTED]"
            } else {
                value.to_str().unwrap_or("[invalid]")
            };
            format!("{}={}", name, value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// The channel authenticates with a bearer JWT
fn is_sensitive_header(name: &str) -> bool {
    matches!(name, "authorization" | "cookie" | "proxy-authorization")
}

fn should_log_header(name: &str) -> bool {
    matches!(
        name,
        "content-type"
            | "content-length"
            | "user-agent"
            | "x-request-id"
            | "ms-cv"
            | "x-forwarded-for"
            | "authorization"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_is_redacted() {
        let request = Request::builder()
            .uri("/api/messages")
            .header("authorization", "Bearer eyJhbGciOi")
            .header("content-type", "application/json")
            .header("etag", "abc")
            .body(Body::empty())
            .unwrap();

        let headers = loggable_headers(&request);

        assert!(headers.contains("authorization=[REDACTED]"));
        assert!(headers.contains("content-type=application/json"));
        assert!(!headers.contains("eyJhbGciOi"));
        assert!(!headers.contains("etag"));
    }

    #[test]
    fn test_request_id_prefers_header() {
        let request = Request::builder()
            .header("ms-cv", "cv-123.1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(extract_request_id(&request), "cv-123.1");
    }

    #[test]
    fn test_request_id_generated_when_missing() {
        let request = Request::builder().body(Body::empty()).unwrap();

        assert!(uuid::Uuid::parse_str(&extract_request_id(&request)).is_ok());
    }
}

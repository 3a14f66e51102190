//! HTTP metrics middleware

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

use crate::infrastructure::observability::record_http_request;

/// Record method, route and status of every request
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = route_of(&request);

    let response = next.run(request).await;

    record_http_request(
        method.as_str(),
        &path,
        response.status().as_u16(),
        start.elapsed(),
    );

    response
}

/// Matched route pattern, falling back to the raw path
fn route_of(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    use super::*;

    #[test]
    fn test_route_falls_back_to_uri_path() {
        let request = Request::builder()
            .uri("/api/messages?x=1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(route_of(&request), "/api/messages");
    }

    #[tokio::test]
    async fn test_passes_response_through() {
        let app = Router::new()
            .route("/live", get(|| async { StatusCode::NO_CONTENT }))
            .layer(middleware::from_fn(metrics_middleware));

        let response = app
            .oneshot(Request::builder().uri("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

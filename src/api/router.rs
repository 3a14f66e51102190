use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::messages;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Router for the bot endpoint and probes; `/metrics` is merged in when a
/// recorder was installed
pub fn create_router(
    state: AppState,
    metrics: Option<(PrometheusMetrics, String)>,
) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/api/messages", post(messages::receive_activity))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http());

    if let Some((handle, path)) = metrics {
        router = router.merge(create_metrics_router(handle, &path));
    }

    router
}

//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use config::MetricsConfig;
pub use metrics::{
    create_metrics_router, init_metrics, record_answer_outcome, record_edit_outcome,
    record_http_request, record_llm_request, LlmRequestMetricParams, PrometheusMetrics,
};

//! Metrics HTTP endpoint.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::warn;

use crate::metrics::Metrics;

/// Path the exporter is scraped on.
pub const METRICS_PATH: &str = "/metrics";

/// Creates the web router with all routes.
pub fn create_router(metrics: Arc<Metrics>) -> Router {
    Router::new()
        .route(METRICS_PATH, get(metrics_get))
        .with_state(metrics)
}

/// GET /metrics - Prometheus text exposition
async fn metrics_get(State(metrics): State<Arc<Metrics>>) -> Response {
    match metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, metrics.content_type()),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            warn!("Failed to encode metrics: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
                .into_response()
        }
    }
}

use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Liveness: the process is up.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness: the store answers queries.
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let live_records = state.store.count(None).await?;
    Ok(Json(json!({
        "status": "ready",
        "live_records_default_partition": live_records,
    })))
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}

/// Server metadata for dashboards.
pub async fn server_metadata(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.uptime_seconds(),
        "provider_mode": state.config.provider_mode,
        "resolver": {
            "top_k": state.config.resolver.top_k,
            "min_similarity": state.config.resolver.min_similarity,
        },
    }))
}

pub mod health;
pub mod keys;
pub mod memories;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Root route: service identification for humans poking at the API.
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "service": "memcore",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "resolve": "POST /api/v1/memories",
            "fetch": "GET /api/v1/memories/{id}",
            "issue_key": "POST /api/v1/keys",
            "health": "GET /health",
            "metrics": "GET /metrics",
        }
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "code": "NOT_FOUND",
                "message": "unknown route",
            }
        })),
    )
}

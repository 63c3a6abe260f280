use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Key issuance response. `api_key` is the only copy of the raw token the
/// system will ever emit; storage keeps the prefix and hash.
#[derive(Debug, Serialize)]
pub struct IssueKeyResponse {
    pub api_key: String,
    pub prefix: String,
}

/// Mint a new API key at runtime.
///
/// Gated behind `allow_key_issuance`: self-hosted and development setups
/// turn it on; hosted deployments provision keys out of band and leave the
/// route returning 404.
pub async fn issue_key(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    if !state.config.allow_key_issuance {
        return Err(ServerError::NotFound);
    }

    let issued = identity::generate_api_key();
    state.register_key(issued.prefix.clone(), issued.hash.clone());
    tracing::info!(prefix = %issued.prefix, "issued API key");

    Ok(Json(IssueKeyResponse {
        api_key: issued.key,
        prefix: issued.prefix,
    }))
}

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use resolver::{Decision, Resolution, ResolveRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

/// Resolve-memory request
#[derive(Debug, Deserialize)]
pub struct ResolveMemoryRequest {
    /// The new memory text
    pub content: String,

    /// Free-form project label; normalized server-side into the partition key
    #[serde(default)]
    pub project: Option<String>,

    /// Opaque attributes stored with an inserted record
    #[serde(default)]
    pub attributes: Option<JsonValue>,

    /// When true, derive the decision without mutating storage
    #[serde(default)]
    pub dry_run: bool,
}

/// Resolve-memory response: the decision plus the run's timing summary.
#[derive(Debug, Serialize)]
pub struct ResolveMemoryResponse {
    #[serde(flatten)]
    pub resolution: Resolution,
    pub dry_run: bool,
}

/// Read view of a stored record. The raw embedding stays server-side; only
/// its dimensionality is surfaced.
#[derive(Debug, Serialize)]
pub struct MemoryView {
    pub id: Uuid,
    pub project: Option<String>,
    pub content: String,
    pub embedding_dim: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<JsonValue>,
}

fn decision_label(decision: Decision) -> &'static str {
    match decision {
        Decision::Insert => "insert",
        Decision::Duplicate => "duplicate",
        Decision::Redundant => "redundant",
        Decision::Supersede => "supersede",
        Decision::Conflict => "conflict",
    }
}

/// Resolve a new memory item against its partition.
///
/// Runs the full pipeline (embed, nearest-neighbor search, relationship
/// classification, decision policy) and commits the storage effect unless
/// `dry_run` is set. A `conflict` decision is a normal 200 response: the
/// record was *not* stored and the caller decides what happens next.
pub async fn resolve_memory(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ResolveMemoryRequest>,
) -> ServerResult<impl IntoResponse> {
    let req = ResolveRequest {
        project: request.project,
        content: request.content,
        attributes: request.attributes,
    };

    let resolution = if request.dry_run {
        state.resolver.resolve(&req).await?
    } else {
        state.resolver.resolve_and_commit(&req).await?
    };

    metrics::counter!(
        "memcore_resolutions_total",
        "decision" => decision_label(resolution.decision),
        "dry_run" => if request.dry_run { "true" } else { "false" },
    )
    .increment(1);

    Ok(Json(ResolveMemoryResponse {
        resolution,
        dry_run: request.dry_run,
    }))
}

/// Fetch one stored memory record by id.
pub async fn get_memory(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> ServerResult<impl IntoResponse> {
    let record = state
        .store
        .get(id)
        .await?
        .ok_or(ServerError::NotFound)?;

    Ok(Json(MemoryView {
        id: record.id,
        project: record.project,
        content: record.content,
        embedding_dim: record.embedding.len(),
        created_at: record.created_at,
        updated_at: record.updated_at,
        superseded_by: record.superseded_by,
        attributes: record.attributes,
    }))
}

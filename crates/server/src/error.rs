use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use classify::ClassifyError;
use embedding::EmbeddingError;
use resolver::ResolveError;
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("rate limit exceeded")]
    RateLimitExceeded,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("internal server error: {0}")]
    Internal(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found")]
    NotFound,
}

impl ServerError {
    /// HTTP status for this error. The split inside `Resolve` is the
    /// user-visible contract: "your input was invalid" is 400, "the
    /// provider is unavailable" is 502, and the two are never conflated.
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServerError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Resolve(err) => match err {
                ResolveError::Embedding(EmbeddingError::InvalidInput(_)) => {
                    StatusCode::BAD_REQUEST
                }
                ResolveError::Embedding(EmbeddingError::Provider(_))
                | ResolveError::Classify(ClassifyError::Provider(_)) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Internal(_) | ServerError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ServerError::Authentication(_) => "AUTH_FAILED",
            ServerError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Resolve(err) => match err {
                ResolveError::Embedding(EmbeddingError::InvalidInput(_)) => "INVALID_INPUT",
                ResolveError::Embedding(EmbeddingError::Provider(_))
                | ResolveError::Classify(ClassifyError::Provider(_)) => "PROVIDER_UNAVAILABLE",
                _ => "RESOLUTION_ERROR",
            },
            ServerError::Store(_) => "STORE_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

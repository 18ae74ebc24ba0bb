//! Shared API state, error mapping and cross-resource handlers

use crate::neo4j::{ObjectId, StoreError};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Shared server state
pub type ApiState = Arc<AppState>;

pub const MISSING_NAME: &str = "Missing `name` in request body";
pub const INVALID_ID: &str = "The `id` is not valid";
pub const NOT_FOUND: &str = "Not Found";

// ============================================================================
// Health check
// ============================================================================

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check handler. Verifies connectivity to the document store.
///
/// Returns 200 + `"ok"` when the store answers, 503 + `"unhealthy"` otherwise.
pub async fn health(State(state): State<ApiState>) -> (StatusCode, Json<HealthResponse>) {
    let store_ok = state.store.health_check().await.unwrap_or(false);

    let (status, label) = if store_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Fallback for unmatched routes and unrouted methods
pub async fn not_found() -> AppError {
    AppError::not_found()
}

// ============================================================================
// Request validation helpers
// ============================================================================

/// Unwrap a JSON body. A request without a JSON content type counts as an
/// empty body so that field checks report what is missing.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

/// Require a non-empty `name`
pub fn require_name(name: Option<String>) -> Result<String, AppError> {
    match name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => {
            tracing::debug!("Rejected request: missing name");
            Err(AppError::BadRequest(MISSING_NAME.to_string()))
        }
    }
}

/// Validate a path id before it reaches the store
pub fn parse_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| {
        tracing::debug!("Rejected request: invalid id {:?}", raw);
        AppError::BadRequest(INVALID_ID.to_string())
    })
}

// ============================================================================
// Error handling
// ============================================================================

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
}

impl AppError {
    pub fn not_found() -> Self {
        AppError::NotFound(NOT_FOUND.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { .. } => AppError::BadRequest(err.to_string()),
            StoreError::InvalidInput(msg) => AppError::BadRequest(msg),
            StoreError::Failure(e) => AppError::Internal(e),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

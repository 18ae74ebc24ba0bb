//! API handlers for folders

use super::handlers::{json_body, parse_id, require_name, ApiState, AppError};
use super::query::NameSearchQuery;
use crate::neo4j::{Folder, FolderUpdate, NewFolder, ObjectId, StoreError};
use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct FolderBody {
    pub name: Option<String>,
}

/// List folders sorted by name
pub async fn list_folders(
    State(state): State<ApiState>,
    Query(query): Query<NameSearchQuery>,
) -> Result<Json<Vec<Folder>>, AppError> {
    if query.is_set() {
        tracing::debug!("Searching folders for {:?}", query.search_term);
    }
    let folders = state.store.find_folders(&query.to_filter()).await?;
    Ok(Json(folders))
}

pub async fn get_folder(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Folder>, AppError> {
    let id = parse_id(&id)?;
    let folder = state
        .store
        .find_folder(&id)
        .await?
        .ok_or_else(AppError::not_found)?;
    Ok(Json(folder))
}

pub async fn create_folder(
    State(state): State<ApiState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<FolderBody>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let name = require_name(json_body(payload)?.name)?;
    let folder = state.store.create_folder(NewFolder { name }).await?;

    tracing::info!("Created folder {} ({})", folder.id, folder.name);
    let location = format!("{}/{}", uri.path(), folder.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(folder),
    ))
}

pub async fn update_folder(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    payload: Result<Json<FolderBody>, JsonRejection>,
) -> Result<Json<Folder>, AppError> {
    let name = require_name(json_body(payload)?.name)?;
    let id = parse_id(&id)?;

    let folder = state
        .store
        .update_folder(&id, FolderUpdate { name })
        .await?
        .ok_or_else(AppError::not_found)?;
    Ok(Json(folder))
}

/// Delete a folder. Missing ids still answer 204.
pub async fn delete_folder(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse_str(&id).map_err(StoreError::from)?;
    if state.store.remove_folder(&id).await?.is_some() {
        tracing::info!("Deleted folder {}", id);
    }
    Ok(StatusCode::NO_CONTENT)
}

//! API handlers for tags

use super::handlers::{json_body, parse_id, require_name, ApiState, AppError};
use super::query::NameSearchQuery;
use crate::neo4j::{NewTag, ObjectId, StoreError, Tag, TagUpdate};
use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

/// Body accepted by create and update
#[derive(Debug, Deserialize, Default)]
pub struct TagBody {
    pub name: Option<String>,
    pub content: Option<String>,
}

/// List tags sorted by name, optionally filtered by `searchTerm`
pub async fn list_tags(
    State(state): State<ApiState>,
    Query(query): Query<NameSearchQuery>,
) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = state.store.find_tags(&query.to_filter()).await?;
    Ok(Json(tags))
}

/// Get a tag by id
pub async fn get_tag(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Tag>, AppError> {
    let id = parse_id(&id)?;
    let tag = state
        .store
        .find_tag(&id)
        .await?
        .ok_or_else(AppError::not_found)?;
    Ok(Json(tag))
}

/// Create a tag
pub async fn create_tag(
    State(state): State<ApiState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<TagBody>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(payload)?;
    let name = require_name(body.name)?;

    let tag = state
        .store
        .create_tag(NewTag {
            name,
            content: body.content,
        })
        .await?;

    tracing::info!("Created tag {} ({})", tag.id, tag.name);
    let location = format!("{}/{}", uri.path(), tag.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(tag)))
}

/// Rename a tag. `content` in the body is ignored.
pub async fn update_tag(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    payload: Result<Json<TagBody>, JsonRejection>,
) -> Result<Json<Tag>, AppError> {
    let body = json_body(payload)?;
    let name = require_name(body.name)?;
    let id = parse_id(&id)?;

    let tag = state
        .store
        .update_tag(&id, TagUpdate { name })
        .await?
        .ok_or_else(AppError::not_found)?;
    Ok(Json(tag))
}

/// Delete a tag. Missing ids still answer 204.
pub async fn delete_tag(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse_str(&id).map_err(StoreError::from)?;
    state.store.remove_tag(&id).await?;

    // Cascade is keyed on the tag id for both the note and the reference,
    // and never fails the request.
    match state.store.pull_note_tag(&id, &id).await {
        Ok(Some(note)) => tracing::debug!("Pulled tag {} from note {}", id, note.id),
        Ok(None) => {}
        Err(e) => tracing::warn!("Failed to pull tag {} from notes: {}", id, e),
    }

    Ok(StatusCode::NO_CONTENT)
}

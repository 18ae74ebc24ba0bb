//! API route definitions

use super::folder_handlers;
use super::handlers::{self, ApiState};
use super::tag_handlers;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // ====================================================================
        // Tags
        // ====================================================================
        .route(
            "/api/tags",
            get(tag_handlers::list_tags).post(tag_handlers::create_tag),
        )
        .route(
            "/api/tags/{id}",
            get(tag_handlers::get_tag)
                .put(tag_handlers::update_tag)
                .delete(tag_handlers::delete_tag),
        )
        // ====================================================================
        // Folders
        // ====================================================================
        .route(
            "/api/folders",
            get(folder_handlers::list_folders).post(folder_handlers::create_folder),
        )
        .route(
            "/api/folders/{id}",
            get(folder_handlers::get_folder)
                .put(folder_handlers::update_folder)
                .delete(folder_handlers::delete_folder),
        )
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

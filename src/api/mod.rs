//! HTTP API for tags and folders

pub mod folder_handlers;
pub mod handlers;
pub mod query;
pub mod routes;
pub mod tag_handlers;

pub use query::*;
pub use routes::create_router;

//! Neo4j-backed document store for tags, folders and notes

pub mod client;
pub mod error;
mod impl_document_store;
pub mod models;
pub mod traits;

pub use client::Neo4jClient;
pub use error::{StoreError, StoreResult};
pub use models::*;
pub use traits::DocumentStore;

#[cfg(test)]
pub(crate) mod mock;

//! DocumentStore trait definition
//!
//! Defines the abstract CRUD interface the HTTP handlers talk to.
//! This trait mirrors the public async methods of `Neo4jClient`,
//! enabling testing with the in-memory mock.

use super::error::StoreResult;
use super::models::*;
use async_trait::async_trait;

/// Abstract interface for document store operations.
///
/// Lookups by id return `Ok(None)` when no record matches.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check connectivity
    async fn health_check(&self) -> StoreResult<bool>;

    // ========================================================================
    // Tag operations
    // ========================================================================

    /// List tags matching the filter, sorted by name
    async fn find_tags(&self, filter: &NameFilter) -> StoreResult<Vec<Tag>>;

    /// Get a tag by id
    async fn find_tag(&self, id: &ObjectId) -> StoreResult<Option<Tag>>;

    /// Create a tag with a fresh id
    async fn create_tag(&self, tag: NewTag) -> StoreResult<Tag>;

    /// Apply an update and return the new value
    async fn update_tag(&self, id: &ObjectId, update: TagUpdate) -> StoreResult<Option<Tag>>;

    /// Remove a tag, returning it if it existed
    async fn remove_tag(&self, id: &ObjectId) -> StoreResult<Option<Tag>>;

    // ========================================================================
    // Folder operations
    // ========================================================================

    /// List folders matching the filter, sorted by name
    async fn find_folders(&self, filter: &NameFilter) -> StoreResult<Vec<Folder>>;

    /// Get a folder by id
    async fn find_folder(&self, id: &ObjectId) -> StoreResult<Option<Folder>>;

    /// Create a folder with a fresh id
    async fn create_folder(&self, folder: NewFolder) -> StoreResult<Folder>;

    /// Apply an update and return the new value
    async fn update_folder(
        &self,
        id: &ObjectId,
        update: FolderUpdate,
    ) -> StoreResult<Option<Folder>>;

    /// Remove a folder, returning it if it existed
    async fn remove_folder(&self, id: &ObjectId) -> StoreResult<Option<Folder>>;

    // ========================================================================
    // Note operations
    // ========================================================================

    /// Get a note by id
    async fn find_note(&self, id: &ObjectId) -> StoreResult<Option<Note>>;

    /// Remove every occurrence of `tag_id` from the tags of note `note_id`
    async fn pull_note_tag(&self, note_id: &ObjectId, tag_id: &ObjectId)
        -> StoreResult<Option<Note>>;

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Insert tags with pre-assigned ids
    async fn insert_tags(&self, tags: &[Tag]) -> StoreResult<usize>;

    /// Insert folders with pre-assigned ids
    async fn insert_folders(&self, folders: &[Folder]) -> StoreResult<usize>;

    /// Insert notes with pre-assigned ids
    async fn insert_notes(&self, notes: &[Note]) -> StoreResult<usize>;

    /// Delete every tag, folder and note
    async fn drop_all(&self) -> StoreResult<()>;
}

//! `DocumentStore` implementation for `Neo4jClient`.
//!
//! Every method simply delegates to the corresponding inherent method on `Neo4jClient`.

use async_trait::async_trait;

use super::client::Neo4jClient;
use super::error::StoreResult;
use super::models::*;
use super::traits::DocumentStore;

#[async_trait]
impl DocumentStore for Neo4jClient {
    async fn health_check(&self) -> StoreResult<bool> {
        self.health_check().await
    }

    // ========================================================================
    // Tag operations
    // ========================================================================

    async fn find_tags(&self, filter: &NameFilter) -> StoreResult<Vec<Tag>> {
        self.find_tags(filter).await
    }

    async fn find_tag(&self, id: &ObjectId) -> StoreResult<Option<Tag>> {
        self.find_tag(id).await
    }

    async fn create_tag(&self, tag: NewTag) -> StoreResult<Tag> {
        self.create_tag(tag).await
    }

    async fn update_tag(&self, id: &ObjectId, update: TagUpdate) -> StoreResult<Option<Tag>> {
        self.update_tag(id, update).await
    }

    async fn remove_tag(&self, id: &ObjectId) -> StoreResult<Option<Tag>> {
        self.remove_tag(id).await
    }

    // ========================================================================
    // Folder operations
    // ========================================================================

    async fn find_folders(&self, filter: &NameFilter) -> StoreResult<Vec<Folder>> {
        self.find_folders(filter).await
    }

    async fn find_folder(&self, id: &ObjectId) -> StoreResult<Option<Folder>> {
        self.find_folder(id).await
    }

    async fn create_folder(&self, folder: NewFolder) -> StoreResult<Folder> {
        self.create_folder(folder).await
    }

    async fn update_folder(
        &self,
        id: &ObjectId,
        update: FolderUpdate,
    ) -> StoreResult<Option<Folder>> {
        self.update_folder(id, update).await
    }

    async fn remove_folder(&self, id: &ObjectId) -> StoreResult<Option<Folder>> {
        self.remove_folder(id).await
    }

    // ========================================================================
    // Note operations
    // ========================================================================

    async fn find_note(&self, id: &ObjectId) -> StoreResult<Option<Note>> {
        self.find_note(id).await
    }

    async fn pull_note_tag(
        &self,
        note_id: &ObjectId,
        tag_id: &ObjectId,
    ) -> StoreResult<Option<Note>> {
        self.pull_note_tag(note_id, tag_id).await
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    async fn insert_tags(&self, tags: &[Tag]) -> StoreResult<usize> {
        self.insert_tags(tags).await
    }

    async fn insert_folders(&self, folders: &[Folder]) -> StoreResult<usize> {
        self.insert_folders(folders).await
    }

    async fn insert_notes(&self, notes: &[Note]) -> StoreResult<usize> {
        self.insert_notes(notes).await
    }

    async fn drop_all(&self) -> StoreResult<()> {
        self.drop_all().await
    }
}

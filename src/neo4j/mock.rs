//! In-memory mock implementation of DocumentStore for testing.
//!
//! Provides a complete mock of all store operations using
//! `tokio::sync::RwLock<HashMap<K, V>>` collections.
//! Conditionally compiled with `#[cfg(test)]`.

use super::error::{StoreError, StoreResult};
use super::models::*;
use super::traits::DocumentStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// In-memory mock implementation of DocumentStore for testing.
pub struct MockDocumentStore {
    pub tags: RwLock<HashMap<ObjectId, Tag>>,
    pub folders: RwLock<HashMap<ObjectId, Folder>>,
    pub notes: RwLock<HashMap<ObjectId, Note>>,
    /// When set, every operation fails as if the connection dropped
    pub offline: AtomicBool,
}

impl MockDocumentStore {
    /// Create a new empty MockDocumentStore.
    pub fn new() -> Self {
        Self {
            tags: RwLock::new(HashMap::new()),
            folders: RwLock::new(HashMap::new()),
            notes: RwLock::new(HashMap::new()),
            offline: AtomicBool::new(false),
        }
    }

    // ========================================================================
    // Builder / seeding methods for tests
    // ========================================================================

    /// Seed a tag into the store.
    pub async fn with_tag(self, tag: Tag) -> Self {
        self.tags.write().await.insert(tag.id, tag);
        self
    }

    /// Seed a folder into the store.
    pub async fn with_folder(self, folder: Folder) -> Self {
        self.folders.write().await.insert(folder.id, folder);
        self
    }

    /// Seed a note into the store.
    pub async fn with_note(self, note: Note) -> Self {
        self.notes.write().await.insert(note.id, note);
        self
    }

    /// Make every subsequent operation fail.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Failure(anyhow::anyhow!(
                "connection to the document store was lost"
            )));
        }
        Ok(())
    }
}

impl Default for MockDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn health_check(&self) -> StoreResult<bool> {
        Ok(!self.offline.load(Ordering::SeqCst))
    }

    // ========================================================================
    // Tag operations
    // ========================================================================

    async fn find_tags(&self, filter: &NameFilter) -> StoreResult<Vec<Tag>> {
        self.check_online()?;
        let tags = self.tags.read().await;
        let mut matching: Vec<Tag> = tags
            .values()
            .filter(|t| filter.matches(&t.name))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matching)
    }

    async fn find_tag(&self, id: &ObjectId) -> StoreResult<Option<Tag>> {
        self.check_online()?;
        Ok(self.tags.read().await.get(id).cloned())
    }

    async fn create_tag(&self, tag: NewTag) -> StoreResult<Tag> {
        self.check_online()?;
        let mut tags = self.tags.write().await;
        if tags.values().any(|t| t.name == tag.name) {
            return Err(StoreError::conflict("Tag"));
        }
        let created = Tag {
            id: ObjectId::new(),
            name: tag.name,
            content: tag.content,
        };
        tags.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_tag(&self, id: &ObjectId, update: TagUpdate) -> StoreResult<Option<Tag>> {
        self.check_online()?;
        let mut tags = self.tags.write().await;
        if !tags.contains_key(id) {
            return Ok(None);
        }
        if tags.values().any(|t| t.id != *id && t.name == update.name) {
            return Err(StoreError::conflict("Tag"));
        }
        Ok(tags.get_mut(id).map(|tag| {
            tag.name = update.name;
            tag.clone()
        }))
    }

    async fn remove_tag(&self, id: &ObjectId) -> StoreResult<Option<Tag>> {
        self.check_online()?;
        Ok(self.tags.write().await.remove(id))
    }

    // ========================================================================
    // Folder operations
    // ========================================================================

    async fn find_folders(&self, filter: &NameFilter) -> StoreResult<Vec<Folder>> {
        self.check_online()?;
        let folders = self.folders.read().await;
        let mut matching: Vec<Folder> = folders
            .values()
            .filter(|f| filter.matches(&f.name))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matching)
    }

    async fn find_folder(&self, id: &ObjectId) -> StoreResult<Option<Folder>> {
        self.check_online()?;
        Ok(self.folders.read().await.get(id).cloned())
    }

    async fn create_folder(&self, folder: NewFolder) -> StoreResult<Folder> {
        self.check_online()?;
        let mut folders = self.folders.write().await;
        if folders.values().any(|f| f.name == folder.name) {
            return Err(StoreError::conflict("Folder"));
        }
        let created = Folder {
            id: ObjectId::new(),
            name: folder.name,
        };
        folders.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_folder(
        &self,
        id: &ObjectId,
        update: FolderUpdate,
    ) -> StoreResult<Option<Folder>> {
        self.check_online()?;
        let mut folders = self.folders.write().await;
        if !folders.contains_key(id) {
            return Ok(None);
        }
        if folders.values().any(|f| f.id != *id && f.name == update.name) {
            return Err(StoreError::conflict("Folder"));
        }
        Ok(folders.get_mut(id).map(|folder| {
            folder.name = update.name;
            folder.clone()
        }))
    }

    async fn remove_folder(&self, id: &ObjectId) -> StoreResult<Option<Folder>> {
        self.check_online()?;
        Ok(self.folders.write().await.remove(id))
    }

    // ========================================================================
    // Note operations
    // ========================================================================

    async fn find_note(&self, id: &ObjectId) -> StoreResult<Option<Note>> {
        self.check_online()?;
        Ok(self.notes.read().await.get(id).cloned())
    }

    async fn pull_note_tag(
        &self,
        note_id: &ObjectId,
        tag_id: &ObjectId,
    ) -> StoreResult<Option<Note>> {
        self.check_online()?;
        Ok(self.notes.write().await.get_mut(note_id).map(|note| {
            note.tags.retain(|t| t != tag_id);
            note.clone()
        }))
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    async fn insert_tags(&self, tags: &[Tag]) -> StoreResult<usize> {
        self.check_online()?;
        let mut store = self.tags.write().await;
        for tag in tags {
            if store.contains_key(&tag.id) || store.values().any(|t| t.name == tag.name) {
                return Err(StoreError::conflict("Tag"));
            }
            store.insert(tag.id, tag.clone());
        }
        Ok(tags.len())
    }

    async fn insert_folders(&self, folders: &[Folder]) -> StoreResult<usize> {
        self.check_online()?;
        let mut store = self.folders.write().await;
        for folder in folders {
            if store.contains_key(&folder.id) || store.values().any(|f| f.name == folder.name) {
                return Err(StoreError::conflict("Folder"));
            }
            store.insert(folder.id, folder.clone());
        }
        Ok(folders.len())
    }

    async fn insert_notes(&self, notes: &[Note]) -> StoreResult<usize> {
        self.check_online()?;
        let mut store = self.notes.write().await;
        for note in notes {
            store.insert(note.id, note.clone());
        }
        Ok(notes.len())
    }

    async fn drop_all(&self) -> StoreResult<()> {
        self.check_online()?;
        self.tags.write().await.clear();
        self.folders.write().await.clear();
        self.notes.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[tokio::test]
    async fn test_find_tags_sorted_and_filtered() {
        let store = MockDocumentStore::new();
        store.insert_tags(&seed_tags()).await.unwrap();

        let all = store.find_tags(&NameFilter::all()).await.unwrap();
        let names: Vec<_> = all.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["bar", "baz", "foo", "qux"]);

        let filtered = store
            .find_tags(&NameFilter::search(Some("BA")))
            .await
            .unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_names_conflict() {
        let store = MockDocumentStore::new();
        store
            .create_folder(NewFolder {
                name: "Work".into(),
            })
            .await
            .unwrap();
        let err = store
            .create_folder(NewFolder {
                name: "Work".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { entity: "Folder" }));
    }

    #[tokio::test]
    async fn test_update_to_existing_name_conflicts() {
        let store = MockDocumentStore::new();
        store.insert_tags(&seed_tags()).await.unwrap();
        let id = seed_tags()[0].id;
        let err = store
            .update_tag(&id, TagUpdate { name: "bar".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { entity: "Tag" }));
    }

    #[tokio::test]
    async fn test_update_missing_id_is_none_even_with_taken_name() {
        let store = MockDocumentStore::new();
        store.insert_folders(&seed_folders()).await.unwrap();
        let missing = ObjectId::parse_str("AAAAAAAAAAAAAAAAAAAAAAAA").unwrap();
        let updated = store
            .update_folder(&missing, FolderUpdate { name: "Work".into() })
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_pull_note_tag() {
        let tag = test_tag("foo");
        let note = test_note("Cats", vec![tag.id, tag.id]);
        let store = MockDocumentStore::new().with_note(note.clone()).await;

        let updated = store.pull_note_tag(&note.id, &tag.id).await.unwrap().unwrap();
        assert!(updated.tags.is_empty());

        let missing = store.pull_note_tag(&tag.id, &tag.id).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_offline_store_fails() {
        let store = MockDocumentStore::new();
        store.go_offline();
        assert!(!store.health_check().await.unwrap());
        assert!(matches!(
            store.find_folders(&NameFilter::all()).await,
            Err(StoreError::Failure(_))
        ));
    }
}

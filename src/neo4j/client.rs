//! Neo4j client backing the Noteful document store
//!
//! Each collection is a node label (`Tag`, `Folder`, `Note`) and each
//! document is one node whose `id` property holds the hex form of its
//! [`ObjectId`]. A note keeps its tag references as a flat list of ids.

use super::error::{StoreError, StoreResult};
use super::models::*;
use anyhow::{Context, Result};
use neo4rs::{query, Graph, Query};
use std::sync::Arc;

const TAG: &str = "Tag";
const FOLDER: &str = "Folder";
const NOTE: &str = "Note";

/// Client for Neo4j operations
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Create a new Neo4j client
    pub async fn new(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .context("Failed to connect to Neo4j")?;

        let client = Self {
            graph: Arc::new(graph),
        };

        // Initialize schema
        client.init_schema().await?;

        Ok(client)
    }

    /// Initialize the unique constraints the handlers rely on
    async fn init_schema(&self) -> Result<()> {
        let constraints = vec![
            "CREATE CONSTRAINT tag_id IF NOT EXISTS FOR (t:Tag) REQUIRE t.id IS UNIQUE",
            "CREATE CONSTRAINT tag_name IF NOT EXISTS FOR (t:Tag) REQUIRE t.name IS UNIQUE",
            "CREATE CONSTRAINT folder_id IF NOT EXISTS FOR (f:Folder) REQUIRE f.id IS UNIQUE",
            "CREATE CONSTRAINT folder_name IF NOT EXISTS FOR (f:Folder) REQUIRE f.name IS UNIQUE",
            "CREATE CONSTRAINT note_id IF NOT EXISTS FOR (n:Note) REQUIRE n.id IS UNIQUE",
        ];

        for constraint in constraints {
            if let Err(e) = self.graph.run(query(constraint)).await {
                tracing::warn!("Constraint may already exist: {}", e);
            }
        }

        Ok(())
    }

    /// Run a query that returns at most one node bound to `alias`
    async fn fetch_node(&self, q: Query, alias: &str) -> StoreResult<Option<neo4rs::Node>> {
        let mut result = self.graph.execute(q).await?;
        match result.next().await? {
            Some(row) => Ok(Some(row.get::<neo4rs::Node>(alias)?)),
            None => Ok(None),
        }
    }

    /// Run a query returning many nodes bound to `alias`
    async fn fetch_nodes(&self, q: Query, alias: &str) -> StoreResult<Vec<neo4rs::Node>> {
        let mut result = self.graph.execute(q).await?;
        let mut nodes = Vec::new();
        while let Some(row) = result.next().await? {
            nodes.push(row.get::<neo4rs::Node>(alias)?);
        }
        Ok(nodes)
    }

    /// Check connectivity with a trivial query
    pub async fn health_check(&self) -> StoreResult<bool> {
        Ok(self.graph.run(query("RETURN 1")).await.is_ok())
    }

    // ========================================================================
    // Tag operations
    // ========================================================================

    /// List tags, optionally filtered by a case-insensitive name substring
    pub async fn find_tags(&self, filter: &NameFilter) -> StoreResult<Vec<Tag>> {
        let q = name_filtered_query("t", TAG, filter);
        self.fetch_nodes(q, "t")
            .await?
            .iter()
            .map(node_to_tag)
            .collect()
    }

    /// Get a tag by id
    pub async fn find_tag(&self, id: &ObjectId) -> StoreResult<Option<Tag>> {
        let q = query("MATCH (t:Tag {id: $id}) RETURN t").param("id", id.to_hex());
        self.fetch_node(q, "t").await?.as_ref().map(node_to_tag).transpose()
    }

    /// Create a tag
    pub async fn create_tag(&self, tag: NewTag) -> StoreResult<Tag> {
        let created = Tag {
            id: ObjectId::new(),
            name: tag.name,
            content: tag.content,
        };
        self.write_tag(&created).await?;
        Ok(created)
    }

    async fn write_tag(&self, tag: &Tag) -> StoreResult<()> {
        let cypher = if tag.content.is_some() {
            "CREATE (t:Tag {id: $id, name: $name, content: $content})"
        } else {
            "CREATE (t:Tag {id: $id, name: $name})"
        };
        let mut q = query(cypher)
            .param("id", tag.id.to_hex())
            .param("name", tag.name.clone());
        if let Some(content) = &tag.content {
            q = q.param("content", content.clone());
        }

        self.graph
            .run(q)
            .await
            .map_err(|e| StoreError::from_neo4j(e, TAG))
    }

    /// Set a tag's name and return the updated tag
    pub async fn update_tag(&self, id: &ObjectId, update: TagUpdate) -> StoreResult<Option<Tag>> {
        let q = query(
            r#"
            MATCH (t:Tag {id: $id})
            SET t.name = $name
            RETURN t
            "#,
        )
        .param("id", id.to_hex())
        .param("name", update.name);

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| StoreError::from_neo4j(e, TAG))?;
        let row = result
            .next()
            .await
            .map_err(|e| StoreError::from_neo4j(e, TAG))?;
        match row {
            Some(row) => Ok(Some(node_to_tag(&row.get::<neo4rs::Node>("t")?)?)),
            None => Ok(None),
        }
    }

    /// Delete a tag, returning it if it existed
    pub async fn remove_tag(&self, id: &ObjectId) -> StoreResult<Option<Tag>> {
        let Some(tag) = self.find_tag(id).await? else {
            return Ok(None);
        };

        let q = query("MATCH (t:Tag {id: $id}) DETACH DELETE t").param("id", id.to_hex());
        self.graph.run(q).await?;
        Ok(Some(tag))
    }

    // ========================================================================
    // Folder operations
    // ========================================================================

    /// List folders, optionally filtered by a case-insensitive name substring
    pub async fn find_folders(&self, filter: &NameFilter) -> StoreResult<Vec<Folder>> {
        let q = name_filtered_query("f", FOLDER, filter);
        self.fetch_nodes(q, "f")
            .await?
            .iter()
            .map(node_to_folder)
            .collect()
    }

    /// Get a folder by id
    pub async fn find_folder(&self, id: &ObjectId) -> StoreResult<Option<Folder>> {
        let q = query("MATCH (f:Folder {id: $id}) RETURN f").param("id", id.to_hex());
        self.fetch_node(q, "f")
            .await?
            .as_ref()
            .map(node_to_folder)
            .transpose()
    }

    /// Create a folder
    pub async fn create_folder(&self, folder: NewFolder) -> StoreResult<Folder> {
        let created = Folder {
            id: ObjectId::new(),
            name: folder.name,
        };
        self.write_folder(&created).await?;
        Ok(created)
    }

    async fn write_folder(&self, folder: &Folder) -> StoreResult<()> {
        let q = query("CREATE (f:Folder {id: $id, name: $name})")
            .param("id", folder.id.to_hex())
            .param("name", folder.name.clone());

        self.graph
            .run(q)
            .await
            .map_err(|e| StoreError::from_neo4j(e, FOLDER))
    }

    /// Set a folder's name and return the updated folder
    pub async fn update_folder(
        &self,
        id: &ObjectId,
        update: FolderUpdate,
    ) -> StoreResult<Option<Folder>> {
        let q = query(
            r#"
            MATCH (f:Folder {id: $id})
            SET f.name = $name
            RETURN f
            "#,
        )
        .param("id", id.to_hex())
        .param("name", update.name);

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| StoreError::from_neo4j(e, FOLDER))?;
        let row = result
            .next()
            .await
            .map_err(|e| StoreError::from_neo4j(e, FOLDER))?;
        match row {
            Some(row) => Ok(Some(node_to_folder(&row.get::<neo4rs::Node>("f")?)?)),
            None => Ok(None),
        }
    }

    /// Delete a folder, returning it if it existed
    pub async fn remove_folder(&self, id: &ObjectId) -> StoreResult<Option<Folder>> {
        let Some(folder) = self.find_folder(id).await? else {
            return Ok(None);
        };

        let q = query("MATCH (f:Folder {id: $id}) DETACH DELETE f").param("id", id.to_hex());
        self.graph.run(q).await?;
        Ok(Some(folder))
    }

    // ========================================================================
    // Note operations
    // ========================================================================

    /// Get a note by id
    pub async fn find_note(&self, id: &ObjectId) -> StoreResult<Option<Note>> {
        let q = query("MATCH (n:Note {id: $id}) RETURN n").param("id", id.to_hex());
        self.fetch_node(q, "n")
            .await?
            .as_ref()
            .map(node_to_note)
            .transpose()
    }

    /// Remove `tag_id` from the tag list of note `note_id`
    pub async fn pull_note_tag(
        &self,
        note_id: &ObjectId,
        tag_id: &ObjectId,
    ) -> StoreResult<Option<Note>> {
        let q = query(
            r#"
            MATCH (n:Note {id: $note_id})
            SET n.tags = [t IN coalesce(n.tags, []) WHERE t <> $tag_id]
            RETURN n
            "#,
        )
        .param("note_id", note_id.to_hex())
        .param("tag_id", tag_id.to_hex());

        self.fetch_node(q, "n")
            .await?
            .as_ref()
            .map(node_to_note)
            .transpose()
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Insert tags keeping their ids
    pub async fn insert_tags(&self, tags: &[Tag]) -> StoreResult<usize> {
        for tag in tags {
            self.write_tag(tag).await?;
        }
        Ok(tags.len())
    }

    /// Insert folders keeping their ids
    pub async fn insert_folders(&self, folders: &[Folder]) -> StoreResult<usize> {
        for folder in folders {
            self.write_folder(folder).await?;
        }
        Ok(folders.len())
    }

    /// Insert notes keeping their ids
    pub async fn insert_notes(&self, notes: &[Note]) -> StoreResult<usize> {
        for note in notes {
            let mut set_clauses = vec!["n.title = $title", "n.tags = $tags"];
            if note.content.is_some() {
                set_clauses.push("n.content = $content");
            }
            if note.folder_id.is_some() {
                set_clauses.push("n.folder_id = $folder_id");
            }

            let cypher = format!("CREATE (n:Note {{id: $id}}) SET {}", set_clauses.join(", "));
            let tags: Vec<String> = note.tags.iter().map(ObjectId::to_hex).collect();

            let mut q = query(&cypher)
                .param("id", note.id.to_hex())
                .param("title", note.title.clone())
                .param("tags", tags);
            if let Some(content) = &note.content {
                q = q.param("content", content.clone());
            }
            if let Some(folder_id) = &note.folder_id {
                q = q.param("folder_id", folder_id.to_hex());
            }

            self.graph
                .run(q)
                .await
                .map_err(|e| StoreError::from_neo4j(e, NOTE))?;
        }
        Ok(notes.len())
    }

    /// Delete every Tag, Folder and Note node
    pub async fn drop_all(&self) -> StoreResult<()> {
        let q = query(
            r#"
            MATCH (n)
            WHERE n:Tag OR n:Folder OR n:Note
            DETACH DELETE n
            "#,
        );
        self.graph.run(q).await?;
        Ok(())
    }
}

/// Build `MATCH (alias:Label) [WHERE ...] RETURN alias ORDER BY alias.name`
fn name_filtered_query(alias: &str, label: &str, filter: &NameFilter) -> Query {
    match filter.term() {
        Some(term) => query(&format!(
            "MATCH ({0}:{1}) WHERE toLower({0}.name) CONTAINS $term RETURN {0} ORDER BY {0}.name",
            alias, label
        ))
        .param("term", term.to_string()),
        None => query(&format!(
            "MATCH ({0}:{1}) RETURN {0} ORDER BY {0}.name",
            alias, label
        )),
    }
}

fn node_id(node: &neo4rs::Node) -> StoreResult<ObjectId> {
    let raw: String = node.get("id")?;
    ObjectId::parse_str(&raw)
        .with_context(|| format!("Stored node has malformed id {}", raw))
        .map_err(StoreError::Failure)
}

fn node_to_tag(node: &neo4rs::Node) -> StoreResult<Tag> {
    Ok(Tag {
        id: node_id(node)?,
        name: node.get("name")?,
        content: node.get("content").ok(),
    })
}

fn node_to_folder(node: &neo4rs::Node) -> StoreResult<Folder> {
    Ok(Folder {
        id: node_id(node)?,
        name: node.get("name")?,
    })
}

fn node_to_note(node: &neo4rs::Node) -> StoreResult<Note> {
    let tags: Vec<String> = node.get("tags").unwrap_or_default();
    Ok(Note {
        id: node_id(node)?,
        title: node.get("title")?,
        content: node.get("content").ok(),
        folder_id: node
            .get::<String>("folder_id")
            .ok()
            .and_then(|s| s.parse().ok()),
        tags: tags.iter().filter_map(|s| s.parse().ok()).collect(),
    })
}


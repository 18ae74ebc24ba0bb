//! Development seed data
//!
//! Loads folders, tags and notes from a JSON file and bulk-inserts them into
//! a [`DocumentStore`], optionally wiping the store first.

use crate::neo4j::{DocumentStore, Folder, Note, StoreResult, Tag};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the seed file, relative to the working directory
pub const DEFAULT_SEED_FILE: &str = "seed/noteful.json";

/// Contents of a seed file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub folders: Vec<Folder>,
    pub tags: Vec<Tag>,
    pub notes: Vec<Note>,
}

/// Counts of inserted records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub folders: usize,
    pub tags: usize,
    pub notes: usize,
}

impl SeedData {
    /// Read and parse a seed file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))
    }
}

/// Insert the seed data. With `reset`, existing records are dropped first.
pub async fn apply(store: &dyn DocumentStore, data: &SeedData, reset: bool) -> StoreResult<SeedReport> {
    if reset {
        tracing::info!("Dropping existing tags, folders and notes");
        store.drop_all().await?;
    }

    let report = SeedReport {
        folders: store.insert_folders(&data.folders).await?,
        tags: store.insert_tags(&data.tags).await?,
        notes: store.insert_notes(&data.notes).await?,
    };

    tracing::info!(
        "Seeded {} folders, {} tags, {} notes",
        report.folders,
        report.tags,
        report.notes
    );
    Ok(report)
}

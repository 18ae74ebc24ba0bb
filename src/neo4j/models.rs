//! Document models stored in Neo4j: tags, folders and notes

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;
use thiserror::Error;

// ============================================================================
// ObjectId
// ============================================================================

/// Error returned when a string cannot be cast to an [`ObjectId`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cast to ObjectId failed for value \"{0}\"")]
pub struct ObjectIdError(pub String);

/// Per-process random bytes embedded in every generated id
static PROCESS_UNIQUE: LazyLock<[u8; 5]> = LazyLock::new(rand::random);

/// Counter embedded in the last 3 bytes, seeded randomly
static COUNTER: LazyLock<AtomicU32> =
    LazyLock::new(|| AtomicU32::new(rand::random::<u32>() & 0x00ff_ffff));

/// A 12-byte document identifier, rendered as 24 hex characters.
///
/// Layout: 4-byte big-endian unix seconds, 5 process-unique bytes,
/// 3-byte big-endian counter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Generate a fresh id
    pub fn new() -> Self {
        let secs = Utc::now().timestamp() as u32;
        let count = COUNTER.fetch_add(1, Ordering::SeqCst) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// True if `s` is exactly 24 hex digits
    pub fn is_valid(s: &str) -> bool {
        s.len() == 24 && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Parse a 24-character hex string (case-insensitive)
    pub fn parse_str(s: &str) -> Result<Self, ObjectIdError> {
        if !Self::is_valid(s) {
            return Err(ObjectIdError(s.to_string()));
        }
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ObjectIdError(s.to_string()))?;
        Ok(Self(bytes))
    }

    /// Creation time encoded in the id
    pub fn timestamp(&self) -> DateTime<Utc> {
        let secs = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        Utc.timestamp_opt(secs as i64, 0)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = ObjectIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_str(&s)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.to_hex()
    }
}

// ============================================================================
// Tags
// ============================================================================

/// A tag that can be attached to notes. `name` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Payload for creating a tag
#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub content: Option<String>,
}

/// Full-document update for a tag. Only `name` is written.
#[derive(Debug, Clone)]
pub struct TagUpdate {
    pub name: String,
}

// ============================================================================
// Folders
// ============================================================================

/// A folder grouping notes. `name` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: ObjectId,
    pub name: String,
}

/// Payload for creating a folder
#[derive(Debug, Clone)]
pub struct NewFolder {
    pub name: String,
}

/// Full-document update for a folder
#[derive(Debug, Clone)]
pub struct FolderUpdate {
    pub name: String,
}

// ============================================================================
// Notes
// ============================================================================

/// A note, optionally filed in a folder and carrying a flat list of tag ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: ObjectId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<ObjectId>,
    #[serde(default)]
    pub tags: Vec<ObjectId>,
}

// ============================================================================
// Filters
// ============================================================================

/// Name filter for list queries: case-insensitive substring on `name`
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    search_term: Option<String>,
}

impl NameFilter {
    /// Filter matching everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Build from an optional search term; an empty term matches everything
    pub fn search(term: Option<&str>) -> Self {
        Self {
            search_term: term.filter(|t| !t.is_empty()).map(str::to_lowercase),
        }
    }

    /// Lowercased search term, if any
    pub fn term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.search_term {
            Some(term) => name.to_lowercase().contains(term.as_str()),
            None => true,
        }
    }
}

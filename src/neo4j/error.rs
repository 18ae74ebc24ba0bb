//! Store error taxonomy
//!
//! Every store operation returns a [`StoreResult`]. A missing record is
//! `Ok(None)`, so the HTTP layer can map each outcome with a plain `match`.

use super::models::ObjectIdError;
use thiserror::Error;

/// Neo4j status code raised when a uniqueness constraint is violated
pub const CONSTRAINT_VIOLATION_CODE: &str = "Neo.ClientError.Schema.ConstraintValidationFailed";

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique `name` is already taken
    #[error("The {entity} name already exists")]
    Conflict { entity: &'static str },

    /// The store refused the input before running the operation
    #[error("{0}")]
    InvalidInput(String),

    /// Anything else coming from the driver
    #[error(transparent)]
    Failure(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn conflict(entity: &'static str) -> Self {
        StoreError::Conflict { entity }
    }

    /// Classify a Neo4j driver error for operations writing `entity` records.
    ///
    /// A failure on RUN arrives as `Error::Neo4j`; a failure while pulling
    /// records (`execute` + `next`) arrives as `Error::UnexpectedMessage`
    /// carrying the server's FAILURE summary.
    pub fn from_neo4j(err: neo4rs::Error, entity: &'static str) -> Self {
        match &err {
            neo4rs::Error::Neo4j(e) if e.code() == CONSTRAINT_VIOLATION_CODE => {
                StoreError::conflict(entity)
            }
            neo4rs::Error::UnexpectedMessage(msg) if msg.contains(CONSTRAINT_VIOLATION_CODE) => {
                StoreError::conflict(entity)
            }
            _ => StoreError::Failure(anyhow::Error::new(err)),
        }
    }
}

impl From<ObjectIdError> for StoreError {
    fn from(err: ObjectIdError) -> Self {
        StoreError::InvalidInput(err.to_string())
    }
}

impl From<neo4rs::Error> for StoreError {
    fn from(err: neo4rs::Error) -> Self {
        StoreError::Failure(anyhow::Error::new(err))
    }
}

impl From<neo4rs::DeError> for StoreError {
    fn from(err: neo4rs::DeError) -> Self {
        StoreError::Failure(anyhow::Error::new(err))
    }
}

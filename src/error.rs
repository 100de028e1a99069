//! @ai:module:intent Define error types for project storage and editing
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use crate::project::ProjectId;
use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for store, service and edit operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to replace project file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error("Team member not found: {0}")]
    TeamMemberNotFound(u64),

    #[error("No {kind} entry with id {id}")]
    EntryNotFound { kind: &'static str, id: u64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Studio error types.

use thiserror::Error;

/// Errors that domain operations can report to their caller.
#[derive(Debug, Error)]
pub enum StudioError {
    /// No template carries the given id.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Generation was requested but the collection is empty.
    #[error("no template available to generate from")]
    NoActiveTemplate,

    /// Import data could not be parsed; nothing was applied.
    #[error("invalid import data: {0}")]
    InvalidImport(#[from] serde_json::Error),

    /// The idea provider failed.
    #[error("idea provider failed: {0}")]
    Provider(#[source] anyhow::Error),

    /// The export bundle could not be serialized.
    #[error("storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Result type for studio operations.
pub type Result<T> = std::result::Result<T, StudioError>;

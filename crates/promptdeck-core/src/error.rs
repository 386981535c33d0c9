//! Error types for the core library.
//!
//! None of these are fatal: storage failures are recovered by the favorites
//! store and clipboard failures are reported through notifications.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed storage contents: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CopyError {
    #[error("no prompt with id {0:?} in the catalog")]
    UnknownPrompt(String),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate prompt id {0:?}")]
    DuplicateId(String),

    #[error("prompt {0:?} has empty text")]
    EmptyText(String),

    #[error("prompt is missing its {0}")]
    EmptyField(&'static str),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

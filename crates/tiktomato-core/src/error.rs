//! Core error types for tiktomato-core.
//!
//! Nothing in the controller is fatal: most of these errors are logged and
//! swallowed at the controller boundary. They surface to callers only where
//! a caller can do something useful with them (validation of user input,
//! image conversion, host configuration).

use std::path::PathBuf;
use thiserror::Error;

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Host configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Unknown settings key
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    /// Index out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Background image conversion errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    /// No bytes were supplied
    #[error("Image file is empty")]
    Empty,

    /// The bytes are not a recognised image format
    #[error("Unsupported image format{}", .declared.as_deref().map(|t| format!(" (declared as {t})")).unwrap_or_default())]
    Unsupported { declared: Option<String> },
}

/// Exclusive display errors reported by a [`DisplayPort`](crate::presentation::DisplayPort).
#[derive(Error, Debug)]
pub enum DisplayError {
    /// The environment refused the request (e.g. no user gesture)
    #[error("Exclusive display request denied: {0}")]
    Denied(String),

    /// The environment has no exclusive display mode
    #[error("Exclusive display is not supported")]
    Unsupported,

    /// Writing the display control sequence failed
    #[error("Display IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

//! Core error types for purepath-core.
//!
//! The streak engine and the navigator are total and never return these.
//! They cover the infrastructure around them: the SQLite kv store, the TOML
//! configuration and the coach HTTP client.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for purepath-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Coach (generative AI) errors
    #[error("Coach error: {0}")]
    Coach(#[from] CoachError),

    /// Credential store errors
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be created
    #[error("Cannot prepare data directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },
}

/// Errors building a [`crate::content::ContentGraph`] from authored data.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// The designated root id has no node
    #[error("root node '{0}' is missing from the dataset")]
    MissingRoot(String),

    /// Two nodes share an id
    #[error("duplicate topic id '{0}'")]
    DuplicateId(String),
}

/// Errors from the generative-AI endpoint.
///
/// These never reach the presentation layer through [`crate::coach::CoachClient`],
/// which swaps them for fixed fallback text. They are exposed for callers
/// that want the raw outcome (`GeminiClient::generate`).
#[derive(Error, Debug)]
pub enum CoachError {
    /// No API key in the environment or keyring
    #[error("No API key configured (set ${env_var} or run `purepath coach set-key`)")]
    MissingApiKey { env_var: String },

    /// Request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The endpoint URL could not be built
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The response carried no text
    #[error("Response contained no text")]
    EmptyResponse,
}

/// Why a chat message was not sent.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SendRejected {
    #[error("message is empty")]
    EmptyMessage,

    /// A reply to the previous message has not arrived yet
    #[error("still waiting for the coach to reply")]
    ReplyPending,
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

impl From<keyring::Error> for CoreError {
    fn from(err: keyring::Error) -> Self {
        CoreError::Keyring(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

//! Error types for snapshot and restore runs
//!
//! Every failure is terminal for the current run. Variants carry enough
//! context (path, scheme, key) for the operator to act on the message.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = SnapshotError> = std::result::Result<T, E>;

/// Main error type for backup and restore
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Location string could not be parsed
    #[error("Invalid location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    /// Location uses a scheme with no storage backend
    #[error("Unknown scheme {scheme}")]
    UnsupportedScheme { scheme: String },

    /// Local destination exists and overwrite was not requested
    #[error("{} exists. Use -f to force overwrite", path.display())]
    AlreadyExists { path: PathBuf },

    /// Snapshot source does not exist
    #[error("Snapshot not found at {location}")]
    NotFound { location: String },

    /// Snapshot document is not an object of string values
    #[error("Malformed snapshot document: {reason}")]
    MalformedDocument { reason: String },

    /// Local filesystem failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote object storage failure
    #[error("Object storage error for {location}: {reason}")]
    Transport { location: String, reason: String },

    /// KV store listing or upsert failure
    #[error("KV store error: {0}")]
    Store(#[from] StoreError),
}

/// KV store client error variants
#[derive(Debug, Error)]
pub enum StoreError {
    /// Request never produced a response
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// Store answered with a non-success status
    #[error("{operation} returned status {status}: {body}")]
    Status {
        operation: String,
        status: u16,
        body: String,
    },

    /// Response body could not be decoded
    #[error("Failed to decode {operation} response: {reason}")]
    Decode { operation: String, reason: String },

    /// Key cannot be expressed as a store request path
    #[error("Key '{key}' cannot be written: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Store accepted the request but refused the write
    #[error("Store refused to write key '{key}'")]
    Rejected { key: String },
}

/// Configuration error variants
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load configuration file
    #[error("Failed to load config from '{path}': {reason}")]
    LoadFailed { path: String, reason: String },

    /// Configuration parsing error
    #[error("Failed to parse config '{path}': {reason}")]
    ParseError { path: String, reason: String },

    /// Invalid configuration value
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

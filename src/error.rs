//! Error types for the Vitrine library.
//!
//! All fallible operations in this crate return [`Result`], whose error type
//! is the [`VitrineError`] enum. The variants map onto the failure taxonomy of
//! the search stack: user-correctable query errors, catalog/storage failures,
//! and configuration problems.
//!
//! # Examples
//!
//! ```
//! use vitrine::error::{Result, VitrineError};
//!
//! fn require_query(q: &str) -> Result<()> {
//!     if q.trim().is_empty() {
//!         return Err(VitrineError::query("Search query is required"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_query("   ").is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Vitrine operations.
#[derive(Error, Debug)]
pub enum VitrineError {
    /// I/O errors (lexicon files, catalog snapshots, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Query-related errors (empty input, malformed parameters)
    #[error("Query error: {0}")]
    Query(String),

    /// Analysis-related errors (tokenization, tagging)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Catalog store errors (backend unavailable, timeouts)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors (bad lexicon file, invalid server settings)
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with VitrineError.
pub type Result<T> = std::result::Result<T, VitrineError>;

impl VitrineError {
    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        VitrineError::Query(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        VitrineError::Analysis(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        VitrineError::Storage(msg.into())
    }

    /// Create a new not-found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        VitrineError::NotFound(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        VitrineError::Config(msg.into())
    }

    /// Create a generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VitrineError::Other(msg.into())
    }

    /// Whether this error is caused by bad user input rather than the system.
    pub fn is_user_error(&self) -> bool {
        matches!(self, VitrineError::Query(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VitrineError::query("Search query is required");
        assert_eq!(err.to_string(), "Query error: Search query is required");

        let err = VitrineError::storage("text index unavailable");
        assert_eq!(err.to_string(), "Storage error: text index unavailable");
    }

    #[test]
    fn test_user_error_classification() {
        assert!(VitrineError::query("empty").is_user_error());
        assert!(!VitrineError::storage("down").is_user_error());
        assert!(!VitrineError::not_found("missing").is_user_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing file");
        let err: VitrineError = io_err.into();
        assert!(matches!(err, VitrineError::Io(_)));
    }
}

//! Error types for the Quiver library.
//!
//! All errors are represented by the [`QuiverError`] enum. Build-time errors
//! abort the whole build; query errors are local to a single query line.
//!
//! # Examples
//!
//! ```
//! use quiver::error::{QuiverError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(QuiverError::malformed_query("unknown operator `^`"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Quiver operations.
#[derive(Error, Debug)]
pub enum QuiverError {
    /// I/O errors (missing corpus directory, unreadable index file, ...)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record that could not be interpreted: a document file name that is
    /// not a valid id, an empty term, or a corrupt index file.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A query line that cannot be evaluated.
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors carrying extra context from the command line layer
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with QuiverError.
pub type Result<T> = std::result::Result<T, QuiverError>;

impl QuiverError {
    /// Create a new malformed record error.
    pub fn malformed_record<S: Into<String>>(msg: S) -> Self {
        QuiverError::MalformedRecord(msg.into())
    }

    /// Create a new malformed query error.
    pub fn malformed_query<S: Into<String>>(msg: S) -> Self {
        QuiverError::MalformedQuery(msg.into())
    }

    /// Whether this error only affects the current query line.
    pub fn is_query_error(&self) -> bool {
        matches!(self, QuiverError::MalformedQuery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = QuiverError::malformed_record("bad id");
        assert_eq!(error.to_string(), "Malformed record: bad id");

        let error = QuiverError::malformed_query("unknown operator");
        assert_eq!(error.to_string(), "Malformed query: unknown operator");
        assert!(error.is_query_error());

        let error = QuiverError::malformed_record("truncated entry");
        assert!(!error.is_query_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let quiver_error = QuiverError::from(io_error);

        match quiver_error {
            QuiverError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_anyhow_context_is_kept() {
        let err = anyhow::anyhow!("disk on fire").context("failed to open stemmed/1.txt");
        let quiver_error = QuiverError::from(err);
        assert_eq!(
            quiver_error.to_string(),
            "failed to open stemmed/1.txt: disk on fire"
        );
    }
}

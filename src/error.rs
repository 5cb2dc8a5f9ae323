//! Custom error types for grove-tools.
//!
//! Both utilities fail fast: library functions return [`Result`] and the
//! binaries propagate it to `main`, which exits non-zero with the chain.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for grove-tools operations.
#[derive(Error, Debug)]
pub enum ToolError {
    // =========================================================================
    // Database Errors
    // =========================================================================
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Schema creation ran but the table is missing from `sqlite_master`.
    #[error("Table '{table}' was not created")]
    MissingTable { table: &'static str },

    // =========================================================================
    // IO Errors
    // =========================================================================
    /// Path-specific IO error with context.
    #[error("Failed to {operation} '{path}': {source}")]
    PathError {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration file parsing error.
    #[error("Invalid configuration in '{path}': {reason}")]
    Config { path: PathBuf, reason: String },
}

/// Result type alias for grove-tools operations.
pub type Result<T> = std::result::Result<T, ToolError>;

impl ToolError {
    /// Create a path error with context.
    pub fn path_error(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::PathError {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a suggestion for how to fix this error, if applicable.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::PathError { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => {
                    Some("Run from the project root, or pass the path explicitly.")
                }
                std::io::ErrorKind::PermissionDenied => {
                    Some("Check file permissions on the target path.")
                }
                _ => None,
            },
            Self::Database(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                Some("Another process holds the database; close it and re-run.")
            }
            Self::Config { .. } => Some("Fix or remove the config file and re-run."),
            _ => None,
        }
    }
}

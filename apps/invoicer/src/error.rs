//! # Application Error Type
//!
//! The top of the error chain: everything the operator can be shown.
//!
//! ## Error Chain
//! ```text
//! sqlx::Error → DbError (sunar-db) → AppError (here) → exit message
//! ```
//!
//! Persistence failures are surfaced, never swallowed. A finalize that
//! fails to save reports the failure and does not produce a PDF.

use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sunar_db::DbError),

    /// PDF rendering failed.
    #[error("PDF rendering failed: {0}")]
    Render(String),

    /// Preference file could not be read or written.
    #[error("Preferences error: {0}")]
    Preferences(String),

    /// Draft file could not be read or parsed.
    #[error("Invalid draft: {0}")]
    InvalidDraft(String),

    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad command-line usage.
    #[error("{0}")]
    Usage(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

//! Error types for the playbook library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::MoveStatus;

/// Comprehensive error type for all playbook operations.
///
/// Preflight failures are deliberately absent: a failing gate is reported as
/// data through [`crate::preflight::PreflightReport`], never as an error.
#[derive(Error, Debug)]
pub enum PlaybookError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Move not found for the given ID
    #[error("Move with ID {id} not found")]
    MoveNotFound { id: u64 },
    /// Checklist item not found within a move
    #[error("Task with ID {task_id} not found in move {move_id}")]
    TaskNotFound { move_id: u64, task_id: u64 },
    /// Problem id unknown to the catalog
    #[error("Problem '{id}' not found in catalog")]
    ProblemNotFound { id: String },
    /// Framework id unknown to the catalog
    #[error("Framework '{id}' not found in catalog")]
    FrameworkNotFound { id: String },
    /// A launch was attempted on a draft whose preflight did not pass
    #[error("Preflight has not passed ({failing} failing checks); refusing to create a move")]
    PreflightNotPassed { failing: usize },
    /// Status change not allowed by the move lifecycle
    #[error("Cannot change move status from {from} to {to}")]
    InvalidTransition { from: MoveStatus, to: MoveStatus },
    /// Any mutation attempted on a completed move
    #[error("Move {id} is completed and read-only")]
    MoveCompleted { id: u64 },
    /// The catalog file is malformed or internally inconsistent
    #[error("Catalog error: {message}")]
    Catalog { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlaybookError {
        PlaybookError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlaybookError {
        PlaybookError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlaybookError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a catalog error from any displayable message.
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// True for errors that mean the addressed resource does not exist.
    ///
    /// Presentation layers use this to render a way back to the move list
    /// instead of a generic failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MoveNotFound { .. }
                | Self::TaskNotFound { .. }
                | Self::ProblemNotFound { .. }
                | Self::FrameworkNotFound { .. }
        )
    }

    /// True for requests the caller can fix by changing its input, as
    /// opposed to storage or environment failures.
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::InvalidTransition { .. }
                | Self::MoveCompleted { .. }
                | Self::PreflightNotPassed { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlaybookError::database(message).with_source(e))
    }
}

/// Result type alias for playbook operations
pub type Result<T> = std::result::Result<T, PlaybookError>;

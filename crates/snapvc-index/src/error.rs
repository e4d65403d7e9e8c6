//! Error types for the index crate.

/// Errors that can occur during index operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IndexError {
    /// The path is already known to the state machine.
    #[error("path already exists: {0}")]
    DuplicatePath(String),

    /// The path was never created or seeded.
    #[error("unknown path: {0}")]
    UnknownPath(String),
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;

use snapvc_types::Digest;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object was never stored.
    #[error("object not found: {0}")]
    NotFound(Digest),

    /// Attempted to write under the null digest.
    #[error("cannot store object with null digest")]
    NullDigest,

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored data is malformed or cannot be decoded.
    #[error("corrupt object {id}: {reason}")]
    CorruptObject { id: Digest, reason: String },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

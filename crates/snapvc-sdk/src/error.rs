use snapvc_types::Digest;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("path already exists: {0}")]
    DuplicatePath(String),

    #[error("unknown path: {0}")]
    UnknownPath(String),

    #[error("nothing staged to commit")]
    EmptyCommit,

    #[error("commit not found: {0}")]
    CommitNotFound(Digest),

    #[error("corrupt commit {id}: {reason}")]
    CorruptCommit { id: Digest, reason: String },

    #[error("failed to read content of {path}: {source}")]
    Content {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid value: {0}")]
    Type(#[from] snapvc_types::TypeError),

    #[error("store error: {0}")]
    Store(#[from] snapvc_store::StoreError),

    #[error("hash error: {0}")]
    Hasher(#[from] snapvc_crypto::HasherError),
}

impl From<snapvc_index::IndexError> for SdkError {
    fn from(err: snapvc_index::IndexError) -> Self {
        use snapvc_index::IndexError;
        match err {
            IndexError::DuplicatePath(path) => Self::DuplicatePath(path),
            IndexError::UnknownPath(path) => Self::UnknownPath(path),
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;

//! High-level SDK for SnapVC.
//!
//! [`Repository`] is the main entry point for collaborators embedding the
//! engine: it owns the file state machine, the staging area, and the commit
//! history, and writes blobs and commits to an [`ObjectStore`].

pub mod commit;
pub mod config;
pub mod content;
pub mod error;
pub mod repository;

pub use commit::{Commit, CommitSummary, Snapshot};
pub use config::RepositoryConfig;
pub use content::{ContentSource, DirectorySource};
pub use error::{SdkError, SdkResult};
pub use repository::Repository;

// Re-export key types
pub use snapvc_index::{FileState, Transition, WorkdirStatus};
pub use snapvc_store::{InMemoryObjectStore, LooseObjectStore, ObjectStore};
pub use snapvc_types::{Digest, RepoPath, Timestamp};

//! Working directory status types.

use serde::{Deserialize, Serialize};
use snapvc_types::RepoPath;

/// Every known path, grouped by lifecycle state. Each list is sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkdirStatus {
    /// Created but never versioned.
    pub untracked: Vec<RepoPath>,
    /// Versioned and unchanged.
    pub tracked: Vec<RepoPath>,
    /// Changed since last tracked or staged.
    pub modified: Vec<RepoPath>,
    /// Waiting in the staging area.
    pub staged: Vec<RepoPath>,
}

impl WorkdirStatus {
    /// Create an empty status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing is modified or staged.
    pub fn is_clean(&self) -> bool {
        self.modified.is_empty() && self.staged.is_empty()
    }

    /// Returns `true` if there are any staged changes.
    pub fn has_staged_changes(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Total number of paths across all categories.
    pub fn total_entries(&self) -> usize {
        self.untracked.len() + self.tracked.len() + self.modified.len() + self.staged.len()
    }
}

//! Per-path lifecycle tracking.
//!
//! ```text
//!   seed ──► Tracked ──modify──► Modified ──stage──► Staged
//!               ▲                   ▲                  │
//!               │                   └──────modify──────┤
//!               └──────────────────commit──────────────┘
//!
//!   create ──► Untracked
//! ```
//!
//! Untracked paths never leave the Untracked state: modifying them is a
//! policy no-op, and only Modified paths can be staged.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use snapvc_types::RepoPath;
use tracing::debug;

use crate::error::{IndexError, IndexResult};
use crate::status::WorkdirStatus;

/// The lifecycle state of a known path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileState {
    /// Created in the working tree but never versioned.
    Untracked,
    /// Versioned and unchanged since the last commit (or seed).
    Tracked,
    /// Changed since it was last tracked or staged.
    Modified,
    /// Content captured in the staging area, pending commit.
    Staged,
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untracked => write!(f, "untracked"),
            Self::Tracked => write!(f, "tracked"),
            Self::Modified => write!(f, "modified"),
            Self::Staged => write!(f, "staged"),
        }
    }
}

/// Outcome of a requested transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The path moved between states.
    Applied { from: FileState, to: FileState },
    /// The path was already in the target state.
    Unchanged(FileState),
    /// The request does not apply to this path (unknown, or the wrong state)
    /// and was dropped without error.
    Ignored,
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Tracks exactly one [`FileState`] per known path.
///
/// A path absent from the machine is treated as nonexistent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileStateMachine {
    states: BTreeMap<RepoPath, FileState>,
}

impl FileStateMachine {
    /// Create an empty machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a machine with every given path Tracked.
    pub fn seeded<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = RepoPath>,
    {
        let mut machine = Self::new();
        for path in paths {
            machine.seed(path);
        }
        machine
    }

    /// Register `path` as Tracked. A path that is already known keeps its
    /// current state; returns whether the path was newly added.
    pub fn seed(&mut self, path: RepoPath) -> bool {
        if self.states.contains_key(&path) {
            return false;
        }
        self.states.insert(path, FileState::Tracked);
        true
    }

    /// Register a brand-new path as Untracked.
    pub fn create(&mut self, path: RepoPath) -> IndexResult<()> {
        if self.states.contains_key(&path) {
            return Err(IndexError::DuplicatePath(path.into_string()));
        }
        debug!(path = %path, "created untracked path");
        self.states.insert(path, FileState::Untracked);
        Ok(())
    }

    /// Signal that the working copy of `path` changed.
    ///
    /// Tracked and Staged paths become Modified. Unknown and Untracked paths
    /// are ignored.
    pub fn modify(&mut self, path: &str) -> Transition {
        let Some(state) = self.states.get_mut(path) else {
            debug!(path, "modify ignored: unknown path");
            return Transition::Ignored;
        };
        match *state {
            FileState::Untracked => {
                debug!(path, "modify ignored: untracked path");
                Transition::Ignored
            }
            FileState::Modified => Transition::Unchanged(FileState::Modified),
            from @ (FileState::Tracked | FileState::Staged) => {
                *state = FileState::Modified;
                Transition::Applied {
                    from,
                    to: FileState::Modified,
                }
            }
        }
    }

    /// Move a Modified path to Staged. Any other state is left alone.
    pub fn stage(&mut self, path: &str) -> Transition {
        match self.states.get_mut(path) {
            Some(state) if *state == FileState::Modified => {
                *state = FileState::Staged;
                Transition::Applied {
                    from: FileState::Modified,
                    to: FileState::Staged,
                }
            }
            Some(state) => {
                debug!(path, state = %state, "stage ignored: path not modified");
                Transition::Ignored
            }
            None => {
                debug!(path, "stage ignored: unknown path");
                Transition::Ignored
            }
        }
    }

    /// Move every Staged path back to Tracked and return them, sorted.
    pub fn commit_staged(&mut self) -> Vec<RepoPath> {
        let mut committed = Vec::new();
        for (path, state) in self.states.iter_mut() {
            if *state == FileState::Staged {
                *state = FileState::Tracked;
                committed.push(path.clone());
            }
        }
        committed
    }

    /// State of a known path.
    pub fn state(&self, path: &str) -> IndexResult<FileState> {
        self.get(path)
            .ok_or_else(|| IndexError::UnknownPath(path.to_string()))
    }

    pub fn get(&self, path: &str) -> Option<FileState> {
        self.states.get(path).copied()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.states.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All paths currently in `state`, sorted.
    pub fn paths_in(&self, state: FileState) -> Vec<&RepoPath> {
        self.states
            .iter()
            .filter(|(_, s)| **s == state)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RepoPath, FileState)> {
        self.states.iter().map(|(p, s)| (p, *s))
    }

    /// Group every known path by state.
    pub fn status(&self) -> WorkdirStatus {
        let mut status = WorkdirStatus::new();
        for (path, state) in &self.states {
            let bucket = match state {
                FileState::Untracked => &mut status.untracked,
                FileState::Tracked => &mut status.tracked,
                FileState::Modified => &mut status.modified,
                FileState::Staged => &mut status.staged,
            };
            bucket.push(path.clone());
        }
        status
    }
}

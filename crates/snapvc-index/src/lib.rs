//! File lifecycle tracking and the staging area for SnapVC.
//!
//! Tracks which state every known working-tree path is in and which content
//! digests are queued for the next commit. Nothing here touches the object
//! store or the filesystem; hashing and storage belong to the repository
//! layer that drives these types.
//!
//! # Key Types
//!
//! - [`FileStateMachine`] -- Per-path lifecycle with guarded transitions
//! - [`FileState`] -- Untracked / Tracked / Modified / Staged
//! - [`Transition`] -- Whether a requested transition applied or was a no-op
//! - [`StagingArea`] -- Path to digest map pending the next commit
//! - [`WorkdirStatus`] -- Paths grouped by state

pub mod error;
pub mod staging;
pub mod state;
pub mod status;

pub use error::{IndexError, IndexResult};
pub use staging::StagingArea;
pub use state::{FileState, FileStateMachine, Transition};
pub use status::WorkdirStatus;

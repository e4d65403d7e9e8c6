//! Foundation types for SnapVC.
//!
//! This crate provides the value types shared by every other SnapVC crate.
//! It has no notion of repositories or storage; it only defines what a
//! content address, a path and a point in time look like.
//!
//! # Key Types
//!
//! - [`Digest`] — Content-addressed identifier (BLAKE3 hash)
//! - [`RepoPath`] — Validated working-tree path used as a map key
//! - [`Timestamp`] — Wall-clock milliseconds since the UNIX epoch

pub mod error;
pub mod object;
pub mod path;
pub mod temporal;

pub use error::TypeError;
pub use object::Digest;
pub use path::RepoPath;
pub use temporal::Timestamp;

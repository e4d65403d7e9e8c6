//! Content-addressed object storage for SnapVC.
//!
//! This crate implements a digest-keyed object store analogous to git's
//! `.git/objects/` directory. File contents and encoded commits are stored as
//! immutable payloads identified by their BLAKE3 digest (domain-separated by
//! object kind).
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//! - [`LooseObjectStore`] -- one zstd-compressed file per object, fanned out
//!   by the first two hex characters of the digest
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written. A second `put` of a known digest
//!    is a no-op.
//! 2. Concurrent reads are always safe (objects are immutable).
//! 3. The store never interprets object contents -- it is a pure key-value store.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod loose;
pub mod memory;
pub mod object;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use loose::LooseObjectStore;
pub use memory::InMemoryObjectStore;
pub use object::ObjectKind;
pub use traits::ObjectStore;

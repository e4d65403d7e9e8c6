//! Content hashing for SnapVC.
//!
//! Every digest in the system comes out of a [`ContentHasher`]. Hashing is
//! domain-separated BLAKE3: a blob and a commit with identical bytes never
//! share an address.
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod hasher;

pub use hasher::{ContentHasher, HasherError};

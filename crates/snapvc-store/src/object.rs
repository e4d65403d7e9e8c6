use snapvc_crypto::ContentHasher;
use snapvc_types::Digest;

/// The kind of payload being stored. Selects the hashing domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Raw file content.
    Blob,
    /// An encoded commit.
    Commit,
}

impl ObjectKind {
    /// The domain-separated hasher that addresses payloads of this kind.
    pub fn hasher(&self) -> &'static ContentHasher {
        match self {
            Self::Blob => &ContentHasher::BLOB,
            Self::Commit => &ContentHasher::COMMIT,
        }
    }

    /// Compute the digest a payload of this kind is stored under.
    pub fn digest(&self, data: &[u8]) -> Digest {
        self.hasher().hash(data)
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Commit => write!(f, "commit"),
        }
    }
}

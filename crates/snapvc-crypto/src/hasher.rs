use snapvc_types::Digest;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (`"snapvc-blob-v1"`, `"snapvc-commit-v1"`)
/// that is prepended to every hash computation. Hashing is a pure function of
/// the domain and the input bytes: no state is carried between calls, and the
/// empty input is valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for file content.
    pub const BLOB: Self = Self {
        domain: "snapvc-blob-v1",
    };
    /// Hasher for commit objects.
    pub const COMMIT: Self = Self {
        domain: "snapvc-commit-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        Digest::from_hash(*hasher.finalize().as_bytes())
    }

    /// Encode a value as JSON and hash the encoding with domain separation.
    ///
    /// Returns the digest together with the bytes it was computed over, so the
    /// caller can store exactly what was hashed. Callers that need a stable
    /// digest must use types whose JSON form is deterministic (ordered maps, no
    /// floating point).
    pub fn encode_json<T: serde::Serialize>(
        &self,
        value: &T,
    ) -> Result<(Digest, Vec<u8>), HasherError> {
        let data =
            serde_json::to_vec(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok((self.hash(&data), data))
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &Digest) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}

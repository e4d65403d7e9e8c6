use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use snapvc_crypto::ContentHasher;
use snapvc_types::{Digest, RepoPath, Timestamp};

use crate::error::{SdkError, SdkResult};

/// Every tracked path at a point in history, mapped to its blob digest.
pub type Snapshot = BTreeMap<RepoPath, Digest>;

/// A point in history.
///
/// The snapshot covers every tracked path, not only the ones that changed:
/// unchanged files carry their previous digest forward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Digest of the encoded commit body.
    pub id: Digest,
    pub message: String,
    pub author: String,
    pub timestamp: Timestamp,
    /// `None` only for the first commit.
    pub parent: Option<Digest>,
    pub snapshot: Snapshot,
}

/// The hashed and stored part of a commit. The id is derived from it and
/// therefore not part of it.
#[derive(Serialize, Deserialize)]
struct CommitBody<M, S> {
    message: M,
    author: M,
    timestamp: Timestamp,
    parent: Option<Digest>,
    snapshot: S,
}

impl Commit {
    /// Build a commit and its canonical encoding. The id is the commit-domain
    /// digest of the returned bytes, so storing the bytes under the id keeps
    /// the store content-addressed.
    pub fn build(
        message: impl Into<String>,
        author: impl Into<String>,
        timestamp: Timestamp,
        parent: Option<Digest>,
        snapshot: Snapshot,
    ) -> SdkResult<(Self, Vec<u8>)> {
        let message = message.into();
        let author = author.into();
        let body = CommitBody {
            message: message.as_str(),
            author: author.as_str(),
            timestamp,
            parent,
            snapshot: &snapshot,
        };
        let (id, bytes) = ContentHasher::COMMIT.encode_json(&body)?;
        let commit = Self {
            id,
            message,
            author,
            timestamp,
            parent,
            snapshot,
        };
        Ok((commit, bytes))
    }

    /// Decode a stored commit body, checking that it hashes to `id`.
    pub fn decode(id: Digest, bytes: &[u8]) -> SdkResult<Self> {
        if !ContentHasher::COMMIT.verify(bytes, &id) {
            return Err(SdkError::CorruptCommit {
                id,
                reason: "content does not match id".into(),
            });
        }
        let body: CommitBody<String, Snapshot> =
            serde_json::from_slice(bytes).map_err(|e| SdkError::CorruptCommit {
                id,
                reason: e.to_string(),
            })?;
        Ok(Self {
            id,
            message: body.message,
            author: body.author,
            timestamp: body.timestamp,
            parent: body.parent,
            snapshot: body.snapshot,
        })
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn short_id(&self) -> String {
        self.id.short_hex()
    }

    /// Digest of `path` in this snapshot.
    pub fn get(&self, path: &str) -> Option<Digest> {
        self.snapshot.get(path).copied()
    }
}

/// One line of history for log display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub id: Digest,
    pub short_id: String,
    pub message: String,
    pub author: String,
    pub timestamp: Timestamp,
    /// Paths added or changed relative to the parent.
    pub changed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, &str)]) -> Snapshot {
        pairs
            .iter()
            .map(|(p, data)| {
                let digest = ContentHasher::BLOB.hash(data.as_bytes());
                (RepoPath::new(*p).unwrap(), digest)
            })
            .collect()
    }

    #[test]
    fn id_is_digest_of_encoding() {
        let (commit, bytes) = Commit::build(
            "init",
            "tester",
            Timestamp::from_millis(1),
            None,
            snapshot(&[("a.txt", "a")]),
        )
        .unwrap();
        assert_eq!(commit.id, ContentHasher::COMMIT.hash(&bytes));
        assert!(commit.is_root());
    }

    #[test]
    fn build_is_deterministic() {
        let make = || {
            Commit::build(
                "msg",
                "tester",
                Timestamp::from_millis(7),
                None,
                snapshot(&[("b", "2"), ("a", "1")]),
            )
            .unwrap()
        };
        assert_eq!(make(), make());
    }

    #[test]
    fn every_field_feeds_the_id() {
        let base = || snapshot(&[("a", "1")]);
        let ts = Timestamp::from_millis(5);
        let (c0, _) = Commit::build("m", "x", ts, None, base()).unwrap();
        let (c1, _) = Commit::build("other", "x", ts, None, base()).unwrap();
        let (c2, _) = Commit::build("m", "y", ts, None, base()).unwrap();
        let (c3, _) = Commit::build("m", "x", Timestamp::from_millis(6), None, base()).unwrap();
        let (c4, _) = Commit::build("m", "x", ts, Some(c0.id), base()).unwrap();
        let (c5, _) = Commit::build("m", "x", ts, None, snapshot(&[("a", "2")])).unwrap();
        for other in [c1, c2, c3, c4, c5] {
            assert_ne!(c0.id, other.id);
        }
    }

    #[test]
    fn decode_roundtrip() {
        let (commit, bytes) = Commit::build(
            "second",
            "tester",
            Timestamp::from_millis(9),
            Some(ContentHasher::COMMIT.hash(b"parent")),
            snapshot(&[("a", "1"), ("dir/b", "2")]),
        )
        .unwrap();
        let decoded = Commit::decode(commit.id, &bytes).unwrap();
        assert_eq!(decoded, commit);
        assert_eq!(decoded.get("dir/b"), Some(ContentHasher::BLOB.hash(b"2")));
    }

    #[test]
    fn decode_rejects_mismatched_id() {
        let (_, bytes) =
            Commit::build("m", "x", Timestamp::zero(), None, Snapshot::new()).unwrap();
        let err = Commit::decode(ContentHasher::COMMIT.hash(b"wrong"), &bytes).unwrap_err();
        assert!(matches!(err, SdkError::CorruptCommit { .. }));
    }

    #[test]
    fn decode_rejects_garbage() {
        let bytes = b"not json";
        let id = ContentHasher::COMMIT.hash(bytes);
        let err = Commit::decode(id, bytes).unwrap_err();
        assert!(matches!(err, SdkError::CorruptCommit { id: bad, .. } if bad == id));
    }
}

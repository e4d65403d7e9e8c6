use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A working-tree path, relative to the repository root.
///
/// Paths are opaque keys to the engine: no normalization is applied and
/// `a/b.txt` and `a//b.txt` are distinct. The only rules are that a path is
/// non-empty and contains no NUL byte. Ordering is plain byte order, which
/// keeps snapshots and status listings deterministic.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoPath(String);

impl RepoPath {
    /// Validate and wrap a path.
    pub fn new(path: impl Into<String>) -> Result<Self, TypeError> {
        let path = path.into();
        if path.is_empty() {
            return Err(TypeError::InvalidPath {
                path,
                reason: "path is empty",
            });
        }
        if path.contains('\0') {
            return Err(TypeError::InvalidPath {
                path,
                reason: "path contains a NUL byte",
            });
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RepoPath({:?})", self.0)
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RepoPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RepoPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for RepoPath {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RepoPath {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RepoPath {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RepoPath> for String {
    fn from(path: RepoPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn accepts_plain_paths() {
        let p = RepoPath::new("src/main.rs").unwrap();
        assert_eq!(p.as_str(), "src/main.rs");
        assert_eq!(p.to_string(), "src/main.rs");
    }

    #[test]
    fn rejects_empty() {
        let err = RepoPath::new("").unwrap_err();
        assert!(matches!(err, TypeError::InvalidPath { .. }));
    }

    #[test]
    fn rejects_nul() {
        assert!(RepoPath::new("a\0b").is_err());
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(RepoPath::new("a.txt").unwrap(), 1);
        assert_eq!(map.get("a.txt"), Some(&1));
        assert_eq!(map.get("b.txt"), None);
    }

    #[test]
    fn ordering_is_bytewise() {
        let mut paths: Vec<RepoPath> = ["b", "a/z", "a"]
            .into_iter()
            .map(|s| s.parse().unwrap())
            .collect();
        paths.sort();
        let names: Vec<&str> = paths.iter().map(RepoPath::as_str).collect();
        assert_eq!(names, vec!["a", "a/z", "b"]);
    }

    #[test]
    fn deserialize_validates() {
        let ok: RepoPath = serde_json::from_str("\"x.txt\"").unwrap();
        assert_eq!(ok.as_str(), "x.txt");
        assert!(serde_json::from_str::<RepoPath>("\"\"").is_err());
    }
}

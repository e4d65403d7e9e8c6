//! The staging area: content digests queued for the next commit.

use std::collections::BTreeMap;

use snapvc_types::{Digest, RepoPath};

/// Paths staged for the next commit, each mapped to the digest of the
/// content captured when it was added.
///
/// Keys are unique: re-staging a path replaces its digest. The map is
/// emptied in one step when a commit is created.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StagingArea {
    entries: BTreeMap<RepoPath, Digest>,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `digest` for `path`, returning the digest it replaced.
    pub fn stage(&mut self, path: RepoPath, digest: Digest) -> Option<Digest> {
        self.entries.insert(path, digest)
    }

    pub fn get(&self, path: &str) -> Option<Digest> {
        self.entries.get(path).copied()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Sorted snapshot of every staged (path, digest) pair.
    pub fn entries(&self) -> Vec<(RepoPath, Digest)> {
        self.entries
            .iter()
            .map(|(path, digest)| (path.clone(), *digest))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RepoPath, &Digest)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> RepoPath {
        RepoPath::new(s).unwrap()
    }

    #[test]
    fn new_area_is_empty() {
        let area = StagingArea::new();
        assert!(area.is_empty());
        assert!(area.entries().is_empty());
    }

    #[test]
    fn restaging_replaces_digest() {
        let mut area = StagingArea::new();
        let d1 = Digest::from_hash([1; 32]);
        let d2 = Digest::from_hash([2; 32]);
        assert_eq!(area.stage(p("a.txt"), d1), None);
        assert_eq!(area.stage(p("a.txt"), d2), Some(d1));
        assert_eq!(area.len(), 1);
        assert_eq!(area.get("a.txt"), Some(d2));
    }

    #[test]
    fn entries_are_sorted_by_path() {
        let mut area = StagingArea::new();
        area.stage(p("z.txt"), Digest::from_hash([26; 32]));
        area.stage(p("a.txt"), Digest::from_hash([10; 32]));
        let paths: Vec<String> = area
            .entries()
            .into_iter()
            .map(|(path, _)| path.into_string())
            .collect();
        assert_eq!(paths, vec!["a.txt", "z.txt"]);
    }

    #[test]
    fn entries_is_a_detached_view() {
        let mut area = StagingArea::new();
        area.stage(p("a.txt"), Digest::from_hash([10; 32]));
        let view = area.entries();
        area.clear();
        assert_eq!(view.len(), 1);
        assert!(area.is_empty());
        assert!(!area.contains("a.txt"));
    }
}

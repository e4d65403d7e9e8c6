//! Where file bytes come from at add time.
//!
//! The engine never walks or watches the working tree. Whoever drives the
//! repository hands it a [`ContentSource`] that can produce the current bytes
//! of a given path.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use snapvc_types::RepoPath;

/// Supplies the current working-tree bytes of a path.
pub trait ContentSource {
    fn read(&self, path: &RepoPath) -> io::Result<Vec<u8>>;
}

impl<F> ContentSource for F
where
    F: Fn(&RepoPath) -> io::Result<Vec<u8>>,
{
    fn read(&self, path: &RepoPath) -> io::Result<Vec<u8>> {
        self(path)
    }
}

impl ContentSource for BTreeMap<RepoPath, Vec<u8>> {
    fn read(&self, path: &RepoPath) -> io::Result<Vec<u8>> {
        self.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no content for {path}"))
        })
    }
}

/// Reads `<root>/<path>` from disk. Paths that would resolve outside `root`
/// (absolute, or climbing with `..`) are refused with `InvalidInput`.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentSource for DirectorySource {
    fn read(&self, path: &RepoPath) -> io::Result<Vec<u8>> {
        let relative = Path::new(path.as_str());
        let escapes = relative.components().any(|c| {
            matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_))
        });
        if escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path {path} leaves {}", self.root.display()),
            ));
        }
        std::fs::read(self.root.join(relative))
    }
}

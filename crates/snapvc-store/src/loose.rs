//! On-disk loose object store.
//!
//! Layout mirrors git's loose objects: the first two hex characters of the
//! digest name a fan-out directory, the remaining 62 name the file.
//!
//! ```text
//! <root>/
//!   3f/
//!     a9c1...   (zstd-compressed payload)
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use snapvc_types::Digest;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;

/// Default zstd compression level for new objects.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// One compressed file per object under a fan-out directory tree.
#[derive(Debug)]
pub struct LooseObjectStore {
    root: PathBuf,
    level: i32,
}

impl LooseObjectStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            level: DEFAULT_COMPRESSION_LEVEL,
        })
    }

    /// Override the zstd level used for objects written from now on.
    pub fn with_compression_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the object for `id` lives on disk.
    pub fn object_path(&self, id: &Digest) -> PathBuf {
        let hex = id.to_hex();
        self.root.join(&hex[..2]).join(&hex[2..])
    }

    /// Every digest present on disk, sorted. Stray files are skipped.
    pub fn all_ids(&self) -> StoreResult<Vec<Digest>> {
        let mut ids = Vec::new();
        for fan in fs::read_dir(&self.root)? {
            let fan = fan?;
            let prefix = fan.file_name().to_string_lossy().into_owned();
            if prefix.len() != 2 || !fan.file_type()?.is_dir() {
                continue;
            }
            for entry in fs::read_dir(fan.path())? {
                let entry = entry?;
                let rest = entry.file_name().to_string_lossy().into_owned();
                if rest.starts_with('.') {
                    // in-flight temp file
                    continue;
                }
                match Digest::from_hex(&format!("{prefix}{rest}")) {
                    Ok(id) => ids.push(id),
                    Err(e) => {
                        warn!(
                            path = %entry.path().display(),
                            error = %e,
                            "skipping stray file in object store"
                        );
                    }
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl ObjectStore for LooseObjectStore {
    fn put(&self, id: &Digest, data: &[u8]) -> StoreResult<()> {
        if id.is_null() {
            return Err(StoreError::NullDigest);
        }
        let path = self.object_path(id);
        if path.exists() {
            return Ok(());
        }
        let dir = path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "object path has no parent"))?;
        fs::create_dir_all(dir)?;

        let compressed = zstd::encode_all(data, self.level)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&compressed)?;
        tmp.as_file().sync_all()?;

        match tmp.persist_noclobber(&path) {
            Ok(_) => {
                debug!(
                    id = %id.short_hex(),
                    len = data.len(),
                    stored = compressed.len(),
                    "wrote loose object"
                );
                Ok(())
            }
            // Lost a race with another writer of the same content.
            Err(_) if path.exists() => Ok(()),
            Err(e) => Err(StoreError::Io(e.error)),
        }
    }

    fn get(&self, id: &Digest) -> StoreResult<Vec<u8>> {
        let compressed = match fs::read(self.object_path(id)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(*id));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        zstd::decode_all(compressed.as_slice()).map_err(|e| StoreError::CorruptObject {
            id: *id,
            reason: e.to_string(),
        })
    }

    fn contains(&self, id: &Digest) -> StoreResult<bool> {
        Ok(self.object_path(id).is_file())
    }
}

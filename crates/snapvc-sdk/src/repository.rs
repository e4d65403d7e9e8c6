use std::sync::Arc;

use snapvc_index::{FileState, FileStateMachine, StagingArea, Transition, WorkdirStatus};
use snapvc_store::{InMemoryObjectStore, ObjectStore};
use snapvc_types::{Digest, RepoPath, Timestamp};
use tracing::{debug, info};

use crate::commit::{Commit, CommitSummary, Snapshot};
use crate::config::RepositoryConfig;
use crate::content::ContentSource;
use crate::error::{SdkError, SdkResult};

/// High-level SnapVC repository API.
///
/// Owns the per-path lifecycle states, the staging area, and the commit
/// history. Mutating operations take `&mut self`, so a repository has
/// exactly one writer at a time; share one across threads behind a `Mutex`.
/// The object store is shared and may be used concurrently.
pub struct Repository {
    config: RepositoryConfig,
    store: Arc<dyn ObjectStore>,
    states: FileStateMachine,
    staging: StagingArea,
    history: Vec<Commit>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("paths", &self.states.len())
            .field("staged", &self.staging.len())
            .field("commits", &self.history.len())
            .field("head", &self.head().map(|c| c.id))
            .finish()
    }
}

impl Repository {
    /// Create a repository whose listed paths start out Tracked, backed by an
    /// in-memory store and the default configuration.
    pub fn new<I>(initially_tracked: I) -> SdkResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::with_store(
            initially_tracked,
            Arc::new(InMemoryObjectStore::new()),
            RepositoryConfig::default(),
        )
    }

    /// Create a repository over any object store backend.
    pub fn with_store<I>(
        initially_tracked: I,
        store: Arc<dyn ObjectStore>,
        config: RepositoryConfig,
    ) -> SdkResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut states = FileStateMachine::new();
        for path in initially_tracked {
            states.seed(RepoPath::new(path.as_ref())?);
        }
        debug!(tracked = states.len(), "repository initialized");
        Ok(Self {
            config,
            store,
            states,
            staging: StagingArea::new(),
            history: Vec::new(),
        })
    }

    /// Rebuild a repository from a commit chain already in `store`.
    ///
    /// Every path in the head snapshot starts out Tracked; the staging area
    /// starts empty.
    pub fn resume(
        store: Arc<dyn ObjectStore>,
        head: Digest,
        config: RepositoryConfig,
    ) -> SdkResult<Self> {
        let mut history = Vec::new();
        let mut next = Some(head);
        while let Some(id) = next {
            let commit = load_from(store.as_ref(), &id)?;
            next = commit.parent;
            history.push(commit);
        }
        history.reverse();

        let states = FileStateMachine::seeded(
            history
                .last()
                .map(|c| c.snapshot.keys().cloned().collect::<Vec<_>>())
                .unwrap_or_default(),
        );
        info!(head = %head.short_hex(), commits = history.len(), "repository resumed");
        Ok(Self {
            config,
            store,
            states,
            staging: StagingArea::new(),
            history,
        })
    }

    // ---- Working tree operations ----

    /// Register a new Untracked path.
    ///
    /// The content is hashed and its blob digest returned, but nothing is
    /// stored: only [`add_files`](Self::add_files) writes blobs.
    pub fn create_file(&mut self, path: &str, content: &[u8]) -> SdkResult<Digest> {
        let path = RepoPath::new(path)?;
        self.states.create(path)?;
        Ok(snapvc_store::ObjectKind::Blob.digest(content))
    }

    /// Signal that `path` changed in the working tree.
    ///
    /// No content is read here; bytes are captured when the path is added.
    /// Unknown and Untracked paths are left alone and reported as
    /// [`Transition::Ignored`].
    pub fn modify_file(&mut self, path: &str) -> Transition {
        self.states.modify(path)
    }

    /// Stage every Modified path in `paths`, reading its bytes from `source`.
    ///
    /// Paths in any other state are skipped. Each path is staged on its own:
    /// if reading or storing fails partway, the paths before it stay staged
    /// and the error is returned. Returns the paths that were staged.
    pub fn add_files<I, S>(&mut self, paths: I, source: &S) -> SdkResult<Vec<RepoPath>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        S: ContentSource + ?Sized,
    {
        let mut staged = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if self.states.get(path) != Some(FileState::Modified) {
                debug!(path, "add skipped: path not modified");
                continue;
            }
            let path = RepoPath::new(path)?;
            let content = source.read(&path).map_err(|e| SdkError::Content {
                path: path.to_string(),
                source: e,
            })?;
            let digest = self.store.put_blob(&content)?;
            self.staging.stage(path.clone(), digest);
            self.states.stage(path.as_str());
            debug!(path = %path, blob = %digest.short_hex(), len = content.len(), "staged");
            staged.push(path);
        }
        Ok(staged)
    }

    // ---- Commit operations ----

    /// Commit the staging area with the current wall-clock time.
    pub fn commit(&mut self, message: &str) -> SdkResult<Commit> {
        self.commit_at(message, Timestamp::now())
    }

    /// Commit the staging area with an explicit timestamp.
    ///
    /// The new snapshot is the previous one overlaid with every staged
    /// digest. Nothing is changed unless the commit object was stored.
    pub fn commit_at(&mut self, message: &str, timestamp: Timestamp) -> SdkResult<Commit> {
        if self.staging.is_empty() {
            return Err(SdkError::EmptyCommit);
        }

        let parent = self.head();
        let mut snapshot: Snapshot = parent.map(|c| c.snapshot.clone()).unwrap_or_default();
        for (path, digest) in self.staging.iter() {
            snapshot.insert(path.clone(), *digest);
        }
        let (commit, body) = Commit::build(
            message,
            self.config.author.as_str(),
            timestamp,
            parent.map(|c| c.id),
            snapshot,
        )?;
        self.store.put(&commit.id, &body)?;

        let changed = self.staging.len();
        self.staging.clear();
        self.states.commit_staged();
        info!(
            id = %commit.short_id(),
            parent = ?commit.parent.map(|p| p.short_hex()),
            changed,
            files = commit.snapshot.len(),
            "commit created"
        );
        self.history.push(commit.clone());
        Ok(commit)
    }

    // ---- Queries ----

    /// Lifecycle state of a known path.
    pub fn state(&self, path: &str) -> SdkResult<FileState> {
        Ok(self.states.state(path)?)
    }

    /// Sorted (path, digest) pairs pending the next commit.
    pub fn staged(&self) -> Vec<(RepoPath, Digest)> {
        self.staging.entries()
    }

    pub fn status(&self) -> WorkdirStatus {
        self.states.status()
    }

    /// The most recent commit, if any.
    pub fn head(&self) -> Option<&Commit> {
        self.history.last()
    }

    /// Every commit, oldest first.
    pub fn history(&self) -> &[Commit] {
        &self.history
    }

    /// Up to `limit` commits, newest first.
    pub fn log(&self, limit: usize) -> Vec<CommitSummary> {
        self.history
            .iter()
            .enumerate()
            .rev()
            .take(limit)
            .map(|(i, c)| {
                // History is a linear chain: each commit's parent is the entry before it.
                let parent = i.checked_sub(1).map(|p| &self.history[p]);
                CommitSummary {
                    id: c.id,
                    short_id: c.short_id(),
                    message: c.message.clone(),
                    author: c.author.clone(),
                    timestamp: c.timestamp,
                    changed: diff_snapshots(c, parent).len(),
                }
            })
            .collect()
    }

    /// [`log`](Self::log) with the configured limit.
    pub fn log_default(&self) -> Vec<CommitSummary> {
        self.log(self.config.log_limit)
    }

    /// Look up a commit in this repository's history.
    pub fn get_commit(&self, id: &Digest) -> SdkResult<&Commit> {
        self.history
            .iter()
            .rev()
            .find(|c| c.id == *id)
            .ok_or(SdkError::CommitNotFound(*id))
    }

    /// Decode a commit object straight from the store.
    pub fn load_commit(&self, id: &Digest) -> SdkResult<Commit> {
        load_from(self.store.as_ref(), id)
    }

    pub fn read_blob(&self, id: &Digest) -> SdkResult<Vec<u8>> {
        Ok(self.store.get(id)?)
    }

    /// Content of `path` as recorded by commit `id`.
    pub fn file_at(&self, id: &Digest, path: &str) -> SdkResult<Vec<u8>> {
        let commit = self.get_commit(id)?;
        let digest = commit
            .get(path)
            .ok_or_else(|| SdkError::UnknownPath(path.to_string()))?;
        self.read_blob(&digest)
    }

    /// Paths whose digest in `commit` differs from its parent, sorted.
    pub fn changed_paths(&self, commit: &Commit) -> Vec<RepoPath> {
        let parent = commit.parent.and_then(|id| self.get_commit(&id).ok());
        diff_snapshots(commit, parent)
    }

    // ---- Accessors ----

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }
}

/// Paths whose digest in `commit` differs from `parent`, sorted.
fn diff_snapshots(commit: &Commit, parent: Option<&Commit>) -> Vec<RepoPath> {
    commit
        .snapshot
        .iter()
        .filter(|(path, digest)| {
            parent.and_then(|p| p.snapshot.get(path.as_str())) != Some(*digest)
        })
        .map(|(path, _)| path.clone())
        .collect()
}

fn load_from(store: &dyn ObjectStore, id: &Digest) -> SdkResult<Commit> {
    let bytes = store.get(id)?;
    Commit::decode(*id, &bytes)
}

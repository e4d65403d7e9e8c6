use std::collections::HashMap;
use std::sync::RwLock;

use snapvc_types::Digest;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. All objects are held in memory behind a
/// `RwLock` for safe concurrent access. Objects are cloned on read.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<Digest, Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored objects.
    pub fn total_bytes(&self) -> u64 {
        self.objects
            .read()
            .expect("lock poisoned")
            .values()
            .map(|data| data.len() as u64)
            .sum()
    }

    /// Return a sorted list of all digests in the store.
    pub fn all_ids(&self) -> Vec<Digest> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<Digest> = map.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn put(&self, id: &Digest, data: &[u8]) -> StoreResult<()> {
        if id.is_null() {
            return Err(StoreError::NullDigest);
        }
        let mut map = self.objects.write().expect("lock poisoned");
        if map.contains_key(id) {
            return Ok(());
        }
        map.insert(*id, data.to_vec());
        debug!(id = %id.short_hex(), len = data.len(), "stored object");
        Ok(())
    }

    fn get(&self, id: &Digest) -> StoreResult<Vec<u8>> {
        let map = self.objects.read().expect("lock poisoned");
        map.get(id).cloned().ok_or(StoreError::NotFound(*id))
    }

    fn contains(&self, id: &Digest) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;

    // -----------------------------------------------------------------------
    // Core put/get
    // -----------------------------------------------------------------------

    #[test]
    fn put_and_get_blob() {
        let store = InMemoryObjectStore::new();
        let id = store.put_blob(b"hello world").unwrap();
        assert!(!id.is_null());
        assert_eq!(store.get(&id).unwrap(), b"hello world");
    }

    #[test]
    fn get_missing_object_is_not_found() {
        let store = InMemoryObjectStore::new();
        let id = ObjectKind::Blob.digest(b"missing");
        let err = store.get(&id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(d) if d == id));
    }

    #[test]
    fn put_rejects_null_digest() {
        let store = InMemoryObjectStore::new();
        let err = store.put(&Digest::null(), b"x").unwrap_err();
        assert!(matches!(err, StoreError::NullDigest));
        assert!(store.is_empty());
    }

    #[test]
    fn empty_content_is_storable() {
        let store = InMemoryObjectStore::new();
        let id = store.put_blob(b"").unwrap();
        assert_eq!(store.get(&id).unwrap(), Vec::<u8>::new());
    }

    // -----------------------------------------------------------------------
    // Content-addressing correctness
    // -----------------------------------------------------------------------

    #[test]
    fn put_twice_stores_once() {
        let store = InMemoryObjectStore::new();
        let id = ObjectKind::Blob.digest(b"idempotent");
        store.put(&id, b"idempotent").unwrap();
        store.put(&id, b"idempotent").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap(), b"idempotent");
        assert_eq!(store.get(&id).unwrap(), b"idempotent");
    }

    #[test]
    fn second_put_never_overwrites() {
        let store = InMemoryObjectStore::new();
        let id = ObjectKind::Blob.digest(b"first");
        store.put(&id, b"first").unwrap();
        store.put(&id, b"second").unwrap();
        assert_eq!(store.get(&id).unwrap(), b"first");
    }

    #[test]
    fn same_content_dedups() {
        let store = InMemoryObjectStore::new();
        let id1 = store.put_blob(b"identical content").unwrap();
        let id2 = store.put_blob(b"identical content").unwrap();
        assert_eq!(id1, id2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn blob_and_commit_with_same_bytes_are_distinct() {
        let store = InMemoryObjectStore::new();
        let blob = store.put_object(ObjectKind::Blob, b"{}").unwrap();
        let commit = store.put_object(ObjectKind::Commit, b"{}").unwrap();
        assert_ne!(blob, commit);
        assert_eq!(store.len(), 2);
    }

    // -----------------------------------------------------------------------
    // Contains / batch
    // -----------------------------------------------------------------------

    #[test]
    fn contains_reflects_puts() {
        let store = InMemoryObjectStore::new();
        let id = ObjectKind::Blob.digest(b"present");
        assert!(!store.contains(&id).unwrap());
        store.put(&id, b"present").unwrap();
        assert!(store.contains(&id).unwrap());
    }

    #[test]
    fn get_batch_in_order() {
        let store = InMemoryObjectStore::new();
        let a = store.put_blob(b"batch-1").unwrap();
        let b = store.put_blob(b"batch-2").unwrap();
        let got = store.get_batch(&[b, a]).unwrap();
        assert_eq!(got, vec![b"batch-2".to_vec(), b"batch-1".to_vec()]);
    }

    #[test]
    fn get_batch_fails_on_missing() {
        let store = InMemoryObjectStore::new();
        let a = store.put_blob(b"exists").unwrap();
        let missing = ObjectKind::Blob.digest(b"missing");
        assert!(store.get_batch(&[a, missing]).is_err());
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[test]
    fn total_bytes_and_sorted_ids() {
        let store = InMemoryObjectStore::new();
        store.put_blob(b"12345").unwrap();
        store.put_blob(b"123456789").unwrap();
        assert_eq!(store.total_bytes(), 14);

        let ids = store.all_ids();
        assert_eq!(ids.len(), 2);
        assert!(ids[0] <= ids[1]);
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryObjectStore::new());
        let id = store.put_blob(b"shared data").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    assert_eq!(store.get(&id).unwrap(), b"shared data");
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    #[test]
    fn concurrent_puts_of_same_content_store_once() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryObjectStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.put_blob(b"racy").unwrap())
            })
            .collect();

        let ids: Vec<Digest> = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect();
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryObjectStore::default();
        store.put_blob(b"x").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryObjectStore"));
        assert!(debug.contains("object_count"));
    }
}

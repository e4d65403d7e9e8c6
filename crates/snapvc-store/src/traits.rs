use snapvc_types::Digest;

use crate::error::StoreResult;
use crate::object::ObjectKind;

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. If a digest is already present,
///   `put` returns without touching the stored bytes.
/// - `get` of a digest that was never put fails with
///   [`StoreError::NotFound`](crate::StoreError::NotFound).
/// - Concurrent reads are always safe (objects are immutable).
/// - The store never interprets object contents — it is a pure key-value store.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `id` if absent.
    ///
    /// The caller is responsible for `id` being the digest of `data`; use
    /// [`put_object`](Self::put_object) to have the store compute it.
    fn put(&self, id: &Digest, data: &[u8]) -> StoreResult<()>;

    /// Read the bytes stored under `id`.
    fn get(&self, id: &Digest) -> StoreResult<Vec<u8>>;

    /// Check whether an object exists in the store.
    fn contains(&self, id: &Digest) -> StoreResult<bool>;

    /// Hash `data` in the domain of `kind`, store it, and return the digest.
    fn put_object(&self, kind: ObjectKind, data: &[u8]) -> StoreResult<Digest> {
        let id = kind.digest(data);
        self.put(&id, data)?;
        Ok(id)
    }

    /// Store file content and return its blob digest.
    fn put_blob(&self, data: &[u8]) -> StoreResult<Digest> {
        self.put_object(ObjectKind::Blob, data)
    }

    /// Read multiple objects. Fails on the first missing digest.
    fn get_batch(&self, ids: &[Digest]) -> StoreResult<Vec<Vec<u8>>> {
        ids.iter().map(|id| self.get(id)).collect()
    }
}

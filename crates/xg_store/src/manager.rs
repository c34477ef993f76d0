//! The resource manager interface (spec §4.8, C9). Implemented
//! independently by [`crate::local::LocalStore`] (a filesystem backend) and
//! [`crate::memory::InMemoryStore`] (a document-store-shaped backend used in
//! tests and for short-lived runs); both honor the same semantics,
//! including `ResourceNotFound` on an absent key.

use crate::content::{Content, Item};
use crate::errors::StoreResult;
use crate::key::ArtifactKey;

/// Byte chunk size used by [`ResourceManager::iterate_over`] when streaming
/// a non-tabular artifact. Mirrors the 64 KiB streaming buffer this
/// workspace's filesystem code uses elsewhere for hashing.
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;

pub trait ResourceManager {
    /// Write `content` at `key`, replacing any prior content at that key.
    fn save_at(&mut self, key: &ArtifactKey, content: Content) -> StoreResult<()>;

    /// Read the content stored at `key`. `StoreError::NotFound` if absent.
    fn get(&self, key: &ArtifactKey) -> StoreResult<Content>;

    fn contains(&self, key: &ArtifactKey) -> bool;

    /// `StoreError::NotFound` if `key` is absent.
    fn remove(&mut self, key: &ArtifactKey) -> StoreResult<()>;

    /// Every key currently stored, filtered by an exact `path` match and/or
    /// an exact `data_type` match when supplied.
    fn get_all(&self, path: Option<&str>, data_type: Option<&str>) -> StoreResult<Vec<ArtifactKey>>;

    /// The first `i` rows of a tabular artifact. `StoreError::NotTabular`
    /// if the stored content is byte-oriented.
    fn head(&self, key: &ArtifactKey, i: usize) -> StoreResult<Vec<Vec<String>>> {
        let content = self.get(key)?;
        let rows = content.rows(key)?;
        Ok(rows.iter().take(i).cloned().collect())
    }

    /// The last `i` rows of a tabular artifact.
    fn tail(&self, key: &ArtifactKey, i: usize) -> StoreResult<Vec<Vec<String>>> {
        let content = self.get(key)?;
        let rows = content.rows(key)?;
        let skip = rows.len().saturating_sub(i);
        Ok(rows[skip..].to_vec())
    }

    /// The first `i` bytes of `key`'s content, tabular or not.
    fn head_raw(&self, key: &ArtifactKey, i: usize) -> StoreResult<Vec<u8>> {
        let bytes = self.get(key)?.as_bytes();
        Ok(bytes.into_iter().take(i).collect())
    }

    /// The last `i` bytes of `key`'s content.
    fn tail_raw(&self, key: &ArtifactKey, i: usize) -> StoreResult<Vec<u8>> {
        let bytes = self.get(key)?.as_bytes();
        let skip = bytes.len().saturating_sub(i);
        Ok(bytes[skip..].to_vec())
    }

    /// Stream `key`'s content: one [`Item::Row`] per row for tabular
    /// content, or fixed-size [`Item::Chunk`]s for byte content.
    fn iterate_over(&self, key: &ArtifactKey) -> StoreResult<Vec<Item>> {
        let content = self.get(key)?;
        Ok(match content {
            Content::Tabular(rows) => rows.into_iter().map(Item::Row).collect(),
            Content::Bytes(bytes) => bytes.chunks(STREAM_CHUNK_SIZE).map(|c| Item::Chunk(c.to_vec())).collect(),
        })
    }
}

//! An in-memory resource manager backend: the document-store counterpart to
//! [`crate::local::LocalStore`], used for short-lived runs and tests where
//! paying for filesystem I/O buys nothing.

use indexmap::IndexMap;

use crate::content::Content;
use crate::errors::{StoreError, StoreResult};
use crate::key::ArtifactKey;
use crate::manager::ResourceManager;

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: IndexMap<ArtifactKey, Content>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceManager for InMemoryStore {
    fn save_at(&mut self, key: &ArtifactKey, content: Content) -> StoreResult<()> {
        self.entries.insert(key.clone(), content);
        Ok(())
    }

    fn get(&self, key: &ArtifactKey) -> StoreResult<Content> {
        self.entries.get(key).cloned().ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn contains(&self, key: &ArtifactKey) -> bool {
        self.entries.contains_key(key)
    }

    fn remove(&mut self, key: &ArtifactKey) -> StoreResult<()> {
        self.entries.shift_remove(key).map(|_| ()).ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn get_all(&self, path: Option<&str>, data_type: Option<&str>) -> StoreResult<Vec<ArtifactKey>> {
        Ok(self
            .entries
            .keys()
            .filter(|k| path.map_or(true, |p| k.path == p))
            .filter(|k| data_type.map_or(true, |t| k.data_type == t))
            .cloned()
            .collect())
    }
}

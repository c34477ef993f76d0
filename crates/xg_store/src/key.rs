//! `ArtifactKey` (spec §3): the (path, name, data-type) triple every
//! resource manager operation is keyed on.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactKey {
    /// Logical directory the artifact lives under (backend-relative, `/`-separated).
    pub path: String,
    pub name: String,
    /// The artifact's declared kind (e.g. `"csv"`, `"json"`, `"png"`); a
    /// backend may also use this to decide how to serialize the content.
    pub data_type: String,
}

impl ArtifactKey {
    pub fn new(path: impl Into<String>, name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), data_type: data_type.into() }
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}.{}", self.path, self.name, self.data_type)
    }
}

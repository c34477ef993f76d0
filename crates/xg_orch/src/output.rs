//! What the orchestrator expects the external program to have written, and
//! where in the resource store the finished artifact belongs (spec §3
//! "Artifact key", §4.9 "the orchestrator relocates the artifact into the
//! repository-side store").

use std::path::PathBuf;

use xg_core::bundle::TestContext;
use xg_store::key::ArtifactKey;

/// Maps a test context to (a) the artifact key it is stored under once
/// archived, and (b) the path, relative to the invocation's working
/// directory, the external program is expected to have written it at.
pub trait OutputTemplate {
    fn artifact_key(&self, tc: &TestContext) -> ArtifactKey;
    fn local_path(&self, tc: &TestContext, cwd: &std::path::Path) -> PathBuf;
}

/// An `OutputTemplate` that names every artifact `<name>.<data_type>` under
/// one fixed logical path, and expects the external program to write that
/// same filename into its working directory — the common case where the
/// caller's naming convention (out of scope per spec §1) has already turned
/// the context into a filename via `name_fn`.
pub struct SingleFileTemplate<F> {
    pub path: String,
    pub data_type: String,
    pub name_fn: F,
}

impl<F> OutputTemplate for SingleFileTemplate<F>
where
    F: Fn(&TestContext) -> String,
{
    fn artifact_key(&self, tc: &TestContext) -> ArtifactKey {
        ArtifactKey::new(self.path.clone(), (self.name_fn)(tc), self.data_type.clone())
    }

    fn local_path(&self, tc: &TestContext, cwd: &std::path::Path) -> PathBuf {
        cwd.join(format!("{}.{}", (self.name_fn)(tc), self.data_type))
    }
}

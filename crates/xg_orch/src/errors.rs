//! Orchestrator error taxonomy (spec §7: `ExternalProgramFailureError` plus
//! the store/curve errors it passes through unchanged).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use xg_curves::errors::CurveError;
use xg_store::errors::StoreError;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// RUNNING → FAILED (spec §4.9): the external program exited non-zero,
    /// or exited 0 but did not write the artifact its output template names.
    #[error("external program failed: cwd={cwd}, command={command_line}, exit_code={exit_code:?}")]
    ExternalProgramFailure {
        cwd: PathBuf,
        command_line: String,
        exit_code: Option<i32>,
    },

    /// The external program could not even be spawned (binary missing, no
    /// exec permission, …) — distinct from a clean non-zero exit.
    #[error("cannot spawn external program {command_line:?} in {cwd}: {source}")]
    SpawnFailed {
        cwd: PathBuf,
        command_line: String,
        source: io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error("io error relocating artifact at {path}: {source}")]
    Relocate { path: PathBuf, source: io::Error },
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

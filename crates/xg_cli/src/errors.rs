//! The CLI's own run-level error taxonomy (spec §7): wraps the manifest
//! loader's and the orchestrator's errors, plus the one I/O step this crate
//! performs itself (creating the resource-store root directory).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliRunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot create output directory {path}: {source}")]
    CreateOutDir { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Orchestrator(#[from] xg_orch::errors::OrchestratorError),
}

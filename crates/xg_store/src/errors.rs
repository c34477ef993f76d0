//! Error taxonomy for the artifact store (spec §7: `ResourceNotFoundError`,
//! `ResourceTypeUnhandledError`).

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("no manager claims data-type {0:?} for this backend")]
    TypeUnhandled(String),

    #[error("content for {0} is not tabular")]
    NotTabular(String),

    #[error("invalid artifact key: {0}")]
    InvalidKey(String),

    #[error("io error at {path}: {source}")]
    Io { path: String, source: io::Error },
}

pub type StoreResult<T> = Result<T, StoreError>;

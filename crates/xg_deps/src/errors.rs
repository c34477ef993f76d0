//! Error taxonomy for graph construction and compliance checking (spec §7).

use thiserror::Error;
use xg_core::errors::OptionError;
use xg_graph::GraphError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Option(#[from] OptionError),

    /// A constraint builder was asked to relate zero options.
    #[error("constraint needs at least one option name")]
    EmptyConstraint,
}

pub type DependencyResult<T> = Result<T, DependencyError>;

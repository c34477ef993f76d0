use thiserror::Error;
use xg_core::errors::OptionError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnumError {
    #[error(transparent)]
    Option(#[from] OptionError),

    /// A mask or candidate list referenced an option no enumerated context declares.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// `MATCHES_REGEX` was given an invalid pattern.
    #[error("invalid regex for option {name}: {source}")]
    InvalidRegex { name: String, source: String },

    /// `query_by_finding_mask` found no context matching the mask.
    #[error("finding mask matched no context")]
    NoMatch,

    /// `query_by_finding_mask` found more than one context matching the mask.
    #[error("finding mask matched {count} contexts, expected exactly one")]
    AmbiguousMatch { count: usize },
}

pub type EnumResult<T> = Result<T, EnumError>;

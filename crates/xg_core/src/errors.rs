//! Shared error taxonomy (see spec §7). Each downstream crate re-exports or
//! wraps [`OptionError`] rather than inventing a parallel "unknown option"
//! variant of its own.

use thiserror::Error;

/// Errors raised while building, validating, or populating option
/// definitions and bundles. Fatal: callers propagate with `?` and abort the
/// run (spec §7: `ValidationError` / `OptionConversionError`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// A name was used twice as an option definition.
    #[error("duplicate option: {0}")]
    DuplicateOption(String),

    /// A bundle or graph operation referenced a name that was never declared.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// A value's runtime shape does not match the option's declared [`crate::value::ValueType`].
    #[error("option {name}: expected {expected}, found incompatible value")]
    TypeMismatch { name: String, expected: &'static str },

    /// A declared domain (enumerated discrete values) rejected a value.
    #[error("option {name}: value not in declared domain")]
    NotInDomain { name: String },

    /// A string value failed to convert to the option's declared type (CLI/config parsing).
    #[error("option {name}: cannot convert {raw:?} to {expected}")]
    OptionConversion {
        name: String,
        raw: String,
        expected: &'static str,
    },

    /// A `SETTINGS` option — which takes exactly one value per run — was given a list.
    #[error("option {0}: SETTINGS options take exactly one value per run")]
    SettingsWantsScalar(String),
}

pub type OptionResult<T> = Result<T, OptionError>;

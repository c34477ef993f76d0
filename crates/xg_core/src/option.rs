//! Option definitions (spec §3 "Option").

use crate::value::{OptionValue, ValueType};

/// Which of the three disjoint kinds of bundle an option belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Belonging {
    /// Takes exactly one value per program run.
    Settings,
    /// Ranges over a user-supplied value list; part of the stuff-under-test bundle.
    UnderTest,
    /// Ranges over a user-supplied value list; part of the environment bundle.
    Environment,
}

/// A named parameter: human description, declared type, belonging, optional
/// default, and (for discrete options) an enumerated domain.
///
/// Lifecycle: defined at program start, immutable thereafter (spec §3).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionDef {
    pub name: String,
    pub description: String,
    pub value_type: ValueType,
    pub belonging: Belonging,
    pub default: Option<OptionValue>,
    /// Enumerated domain for discrete options; `None` means any value of
    /// `value_type` is accepted.
    pub domain: Option<Vec<OptionValue>>,
}

impl OptionDef {
    pub fn new(name: impl Into<String>, description: impl Into<String>, value_type: ValueType, belonging: Belonging) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value_type,
            belonging,
            default: None,
            domain: None,
        }
    }

    pub fn with_default(mut self, default: OptionValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_domain(mut self, domain: Vec<OptionValue>) -> Self {
        self.domain = Some(domain);
        self
    }

    /// True if `value` is compliant with this option's declared type and
    /// (when present) enumerated domain.
    pub fn accepts(&self, value: &OptionValue) -> bool {
        if value.value_type() != self.value_type {
            return false;
        }
        match &self.domain {
            Some(domain) => domain.contains(value),
            None => true,
        }
    }
}

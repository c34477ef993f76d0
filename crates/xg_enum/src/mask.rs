//! Test-context masks and the mask query language (spec §3/§4.5, C6).
//!
//! Grounded on `original_source/PhdTester/phdTester/masks.py`: each
//! `MaskOption` variant here is one of that module's `TestContextMask*`
//! classes, collapsed from a class hierarchy into a closed enum since Rust
//! doesn't need a subclass per variant to get polymorphism.

use indexmap::IndexMap;
use regex::Regex;

use xg_core::bundle::TestContext;
use xg_core::value::OptionValue;

use crate::errors::{EnumError, EnumResult};

/// One option's match rule within a [`TestContextMask`].
#[derive(Debug, Clone)]
pub enum MaskOption {
    /// Always matches; the option is not considered.
    Ignore,
    Equals(OptionValue),
    NotEquals(OptionValue),
    InSet(Vec<OptionValue>),
    IsNull,
    IsNotNull,
    MatchesRegex(Regex),
    /// Late-bound: resolved to `Equals`/`IsNull` against a caller-supplied
    /// parameter value for the same option name by
    /// [`TestContextMask::set_params`] before the mask is ever evaluated
    /// against a repository.
    EqualsTo,
    /// Not a per-context predicate: after every other entry has filtered
    /// the candidate set, this option's value must be identical across
    /// every context that remains (trivially satisfied by a set of size
    /// 0 or 1 — spec §9 Open Question, resolved this way since
    /// `masks.py::TestContextMaskNeedsToBeTheSameOverSet` special-cases
    /// singleton sets as trivially true).
    ConstantOverSet,
}

/// What a "well-specified" mask option represents (spec §3: "A mask option
/// reports whether it represents a 'well-specified' single value (used for
/// labeling) and can yield that value"). Grounded on `masks.py`'s
/// `represents_a_well_specified_value`/`get_well_specified_value`: most
/// variants report a single value or null, but `InSet` reports its whole
/// candidate set (used there to build a report subtitle like "x in [1, 2]").
#[derive(Debug, Clone, PartialEq)]
pub enum WellSpecifiedValue {
    Null,
    Single(OptionValue),
    Set(Vec<OptionValue>),
}

impl MaskOption {
    pub fn matches_regex(pattern: &str) -> EnumResult<Self> {
        Regex::new(pattern)
            .map(MaskOption::MatchesRegex)
            .map_err(|e| EnumError::InvalidRegex { name: pattern.to_string(), source: e.to_string() })
    }

    /// `true` iff [`Self::well_specified_value`] would return `Some`.
    pub fn represents_a_well_specified_value(&self) -> bool {
        self.well_specified_value().is_some()
    }

    /// The single value (or null, or candidate set) this mask option pins
    /// down, for labeling purposes — `None` for masks that admit more than
    /// one compliant value (`Ignore`, `NotEquals`, `IsNotNull`,
    /// `MatchesRegex`, `ConstantOverSet`) or an as-yet-unresolved `EqualsTo`.
    pub fn well_specified_value(&self) -> Option<WellSpecifiedValue> {
        match self {
            MaskOption::Equals(v) => Some(WellSpecifiedValue::Single(v.clone())),
            MaskOption::InSet(set) => Some(WellSpecifiedValue::Set(set.clone())),
            MaskOption::IsNull => Some(WellSpecifiedValue::Null),
            MaskOption::Ignore
            | MaskOption::NotEquals(_)
            | MaskOption::IsNotNull
            | MaskOption::MatchesRegex(_)
            | MaskOption::EqualsTo
            | MaskOption::ConstantOverSet => None,
        }
    }

    /// Per-context predicate. `ConstantOverSet` always matches here — it is
    /// applied as a set-wide post-filter by [`super::repository::Repository`],
    /// not per context. `EqualsTo` must already have been resolved by
    /// [`TestContextMask::set_params`]; an unresolved one is treated as
    /// always-matching (equivalent to `Ignore`), since there is nothing left
    /// to compare against.
    fn matches(&self, value: Option<&OptionValue>) -> bool {
        match self {
            MaskOption::Ignore | MaskOption::ConstantOverSet | MaskOption::EqualsTo => true,
            MaskOption::Equals(expected) => value == Some(expected),
            MaskOption::NotEquals(expected) => value != Some(expected),
            MaskOption::InSet(set) => value.map(|v| set.contains(v)).unwrap_or(false),
            MaskOption::IsNull => value.is_none(),
            MaskOption::IsNotNull => value.is_some(),
            MaskOption::MatchesRegex(re) => match value {
                Some(OptionValue::Str(s)) => re.is_match(s),
                _ => false,
            },
        }
    }
}

/// An ordered `option name -> rule` mapping. Options the mask omits are
/// implicitly `Ignore`d.
#[derive(Debug, Clone, Default)]
pub struct TestContextMask {
    entries: IndexMap<String, MaskOption>,
}

impl TestContextMask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, rule: MaskOption) -> Self {
        self.entries.insert(name.into(), rule);
        self
    }

    pub fn get(&self, name: &str) -> Option<&MaskOption> {
        self.entries.get(name)
    }

    pub fn constant_over_set_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter(|(_, rule)| matches!(rule, MaskOption::ConstantOverSet)).map(|(k, _)| k.as_str())
    }

    pub fn is_match(&self, tc: &TestContext) -> bool {
        self.entries.iter().all(|(name, rule)| rule.matches(tc.get_option(name).ok().flatten()))
    }

    /// Resolve every `EqualsTo` entry against a late-bound parameter value
    /// for the same option name, replacing it with a concrete `Equals` (or
    /// `IsNull` when the caller supplies no value for that name). Mirrors
    /// `masks.py`'s mutable `set_params`, made immutable/builder-style.
    pub fn set_params(&self, params: &IndexMap<String, OptionValue>) -> TestContextMask {
        let mut bound = self.clone();
        for (name, rule) in bound.entries.iter_mut() {
            if matches!(rule, MaskOption::EqualsTo) {
                *rule = match params.get(name) {
                    Some(v) => MaskOption::Equals(v.clone()),
                    None => MaskOption::IsNull,
                };
            }
        }
        bound
    }
}

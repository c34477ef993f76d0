//! Option bundles and test contexts (spec §3 "Option bundle" / "Test context").
//!
//! Re-architects `original_source/PhdTester/phdTester/option_dicts.py`'s
//! "dynamic attribute bag" (a class whose fields are named at runtime) as an
//! explicit schema (the ordered set of accepted names) plus a value
//! container, per the REDESIGN FLAGS in spec §9.

use indexmap::{IndexMap, IndexSet};

use crate::errors::{OptionError, OptionResult};
use crate::value::OptionValue;

/// The three disjoint kinds of bundle named in spec §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BundleKind {
    StuffUnderTest,
    Environment,
    GlobalSettings,
}

/// An ordered name → value-or-null mapping of one [`BundleKind`].
///
/// Rejects setting unknown names; permits null values (spec §3). Also
/// carries the key-alias / value-alias maps an external serialization codec
/// (out of this crate's scope) may consult — the core never interprets them.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionBundle {
    kind: BundleKind,
    values: IndexMap<String, Option<OptionValue>>,
    key_alias: IndexMap<String, String>,
    value_alias: IndexMap<(String, String), String>,
}

impl OptionBundle {
    /// Create an empty bundle accepting exactly `names` (in the given
    /// order), all initialized to null.
    pub fn new(kind: BundleKind, names: impl IntoIterator<Item = String>) -> Self {
        let values = names.into_iter().map(|n| (n, None)).collect();
        Self {
            kind,
            values,
            key_alias: IndexMap::new(),
            value_alias: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> BundleKind {
        self.kind
    }

    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Fetch the current value. Returns `Err` only if `name` was never
    /// declared accepted; a declared-but-null option returns `Ok(None)`.
    pub fn get_option(&self, name: &str) -> OptionResult<Option<&OptionValue>> {
        self.values
            .get(name)
            .map(|v| v.as_ref())
            .ok_or_else(|| OptionError::UnknownOption(name.to_string()))
    }

    /// Set (or clear, with `None`) the value of a declared option.
    pub fn set_option(&mut self, name: &str, value: Option<OptionValue>) -> OptionResult<()> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(OptionError::UnknownOption(name.to_string())),
        }
    }

    pub fn with_key_alias(mut self, canonical: impl Into<String>, alias: impl Into<String>) -> Self {
        self.key_alias.insert(canonical.into(), alias.into());
        self
    }

    pub fn with_value_alias(mut self, key: impl Into<String>, value: impl Into<String>, alias: impl Into<String>) -> Self {
        self.value_alias.insert((key.into(), value.into()), alias.into());
        self
    }

    pub fn key_alias(&self, canonical: &str) -> Option<&str> {
        self.key_alias.get(canonical).map(String::as_str)
    }

    pub fn value_alias(&self, key: &str, value: &str) -> Option<&str> {
        self.value_alias.get(&(key.to_string(), value.to_string())).map(String::as_str)
    }

    /// Names whose value is non-null.
    pub fn set_names(&self) -> IndexSet<String> {
        self.values
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|_| k.clone()))
            .collect()
    }

    pub(crate) fn values(&self) -> &IndexMap<String, Option<OptionValue>> {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut IndexMap<String, Option<OptionValue>> {
        &mut self.values
    }
}

/// `stuff-under-test bundle ⨁ environment bundle` — a union over disjoint
/// name sets (spec §3). Two test contexts are equal iff all their option
/// values are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct TestContext {
    under_test: OptionBundle,
    environment: OptionBundle,
}

impl TestContext {
    pub fn new(under_test: OptionBundle, environment: OptionBundle) -> Self {
        debug_assert_eq!(under_test.kind(), BundleKind::StuffUnderTest);
        debug_assert_eq!(environment.kind(), BundleKind::Environment);
        Self { under_test, environment }
    }

    pub fn under_test(&self) -> &OptionBundle {
        &self.under_test
    }

    pub fn environment(&self) -> &OptionBundle {
        &self.environment
    }

    pub fn under_test_mut(&mut self) -> &mut OptionBundle {
        &mut self.under_test
    }

    pub fn environment_mut(&mut self) -> &mut OptionBundle {
        &mut self.environment
    }

    /// Iterate all option names across both bundles, under-test first.
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.under_test.option_names().chain(self.environment.option_names())
    }

    pub fn get_option(&self, name: &str) -> OptionResult<Option<&OptionValue>> {
        if self.under_test.accepts(name) {
            self.under_test.get_option(name)
        } else if self.environment.accepts(name) {
            self.environment.get_option(name)
        } else {
            Err(OptionError::UnknownOption(name.to_string()))
        }
    }

    pub fn set_option(&mut self, name: &str, value: Option<OptionValue>) -> OptionResult<()> {
        if self.under_test.accepts(name) {
            self.under_test.set_option(name, value)
        } else if self.environment.accepts(name) {
            self.environment.set_option(name, value)
        } else {
            Err(OptionError::UnknownOption(name.to_string()))
        }
    }

    /// Null out every option whose name is not in `relevant`. Used by the
    /// enumerator's relevance-pruning step (spec §4.3 point 3).
    pub fn prune_to_relevant(&mut self, relevant: &IndexSet<String>) {
        for (name, slot) in self.under_test.values_mut() {
            if !relevant.contains(name) {
                *slot = None;
            }
        }
        for (name, slot) in self.environment.values_mut() {
            if !relevant.contains(name) {
                *slot = None;
            }
        }
    }
}

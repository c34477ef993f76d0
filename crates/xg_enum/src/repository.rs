//! The test-context repository (spec §4.5, C6): an ordered collection of
//! previously-enumerated contexts queryable by [`TestContextMask`].

use xg_core::bundle::TestContext;

use crate::errors::{EnumError, EnumResult};
use crate::mask::TestContextMask;

#[derive(Debug, Clone, Default)]
pub struct Repository {
    contexts: Vec<TestContext>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contexts(contexts: Vec<TestContext>) -> Self {
        Self { contexts }
    }

    pub fn insert(&mut self, tc: TestContext) {
        self.contexts.push(tc);
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestContext> {
        self.contexts.iter()
    }

    /// Every stored context matching `mask`, insertion order preserved. Any
    /// `ConstantOverSet` entry is applied as a set-wide post-filter: the
    /// first surviving context's value for that option becomes the required
    /// value for the rest (trivially satisfied when 0 or 1 contexts survive
    /// the per-context predicates).
    pub fn query_by_mask(&self, mask: &TestContextMask) -> Vec<&TestContext> {
        let mut matched: Vec<&TestContext> = self.contexts.iter().filter(|tc| mask.is_match(tc)).collect();
        for key in mask.constant_over_set_keys() {
            let Some(required) = matched.first().and_then(|tc| tc.get_option(key).ok().flatten()).cloned() else {
                continue;
            };
            matched.retain(|tc| tc.get_option(key).ok().flatten() == Some(&required));
        }
        matched
    }

    /// `query_by_mask` plus an assertion that exactly one context matches
    /// (spec §4.5). Fails with a diagnostic rather than returning an empty
    /// or ambiguous view.
    pub fn query_by_finding_mask(&self, mask: &TestContextMask) -> EnumResult<&TestContext> {
        let matched = self.query_by_mask(mask);
        match matched.len() {
            0 => Err(EnumError::NoMatch),
            1 => Ok(matched[0]),
            count => Err(EnumError::AmbiguousMatch { count }),
        }
    }
}

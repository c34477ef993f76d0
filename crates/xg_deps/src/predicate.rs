//! A small, named predicate surface over a hyperedge's endpoint values.
//!
//! Per spec §9 design notes, conditions are built from a closed set of named
//! leaves plus `and`/`or`/`not` combinators rather than arbitrary closures,
//! so a constructed graph stays debuggable (`{:?}` actually says something)
//! instead of opaque. [`Predicate::Custom`] is the escape hatch for the rare
//! constraint (e.g. `RequiresMapping`'s transform) that genuinely needs one.

use std::fmt;
use std::sync::Arc;

use xg_core::value::OptionValue;

/// One (name, current-value) pair, as handed to a [`Predicate`] by a
/// `Condition` — covers both the edge's source and every one of its sinks.
pub type Endpoint<'a> = (&'a str, Option<&'a OptionValue>);

#[derive(Clone)]
pub enum Predicate {
    ValueEquals(String, OptionValue),
    ValueInSet(String, Vec<OptionValue>),
    ValueIsNull(String),
    ValueIsNotNull(String),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Custom(Arc<dyn Fn(&[Endpoint<'_>]) -> bool + Send + Sync>),
}

impl Predicate {
    pub fn custom(f: impl Fn(&[Endpoint<'_>]) -> bool + Send + Sync + 'static) -> Self {
        Predicate::Custom(Arc::new(f))
    }

    fn find<'a>(endpoints: &[Endpoint<'a>], name: &str) -> Option<&'a OptionValue> {
        endpoints.iter().find(|(n, _)| *n == name).and_then(|(_, v)| *v)
    }

    pub fn test(&self, endpoints: &[Endpoint<'_>]) -> bool {
        match self {
            Predicate::ValueEquals(name, expected) => Self::find(endpoints, name) == Some(expected),
            Predicate::ValueInSet(name, set) => {
                Self::find(endpoints, name).map(|v| set.contains(v)).unwrap_or(false)
            }
            Predicate::ValueIsNull(name) => Self::find(endpoints, name).is_none(),
            Predicate::ValueIsNotNull(name) => Self::find(endpoints, name).is_some(),
            Predicate::And(ps) => ps.iter().all(|p| p.test(endpoints)),
            Predicate::Or(ps) => ps.iter().any(|p| p.test(endpoints)),
            Predicate::Not(p) => !p.test(endpoints),
            Predicate::Custom(f) => f(endpoints),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_or_not_compose() {
        let endpoints = [("a", Some(&OptionValue::Bool(true))), ("b", Some(&OptionValue::Bool(false)))];
        let a_true = Predicate::ValueEquals("a".into(), OptionValue::Bool(true));
        let b_true = Predicate::ValueEquals("b".into(), OptionValue::Bool(true));

        assert!(Predicate::And(vec![a_true.clone()]).test(&endpoints));
        assert!(!Predicate::And(vec![a_true.clone(), b_true.clone()]).test(&endpoints));
        assert!(Predicate::Or(vec![a_true.clone(), b_true.clone()]).test(&endpoints));
        assert!(Predicate::Not(Box::new(b_true)).test(&endpoints));
    }

    #[test]
    fn null_lookup_misses_every_leaf_but_is_null() {
        let endpoints = [("a", None)];
        assert!(Predicate::ValueIsNull("a".into()).test(&endpoints));
        assert!(!Predicate::ValueIsNotNull("a".into()).test(&endpoints));
        assert!(!Predicate::ValueEquals("a".into(), OptionValue::Bool(true)).test(&endpoints));
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::ValueEquals(n, v) => write!(f, "ValueEquals({n}, {v:?})"),
            Predicate::ValueInSet(n, vs) => write!(f, "ValueInSet({n}, {vs:?})"),
            Predicate::ValueIsNull(n) => write!(f, "ValueIsNull({n})"),
            Predicate::ValueIsNotNull(n) => write!(f, "ValueIsNotNull({n})"),
            Predicate::And(ps) => write!(f, "And({ps:?})"),
            Predicate::Or(ps) => write!(f, "Or({ps:?})"),
            Predicate::Not(p) => write!(f, "Not({p:?})"),
            Predicate::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

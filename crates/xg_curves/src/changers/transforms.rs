use std::sync::Arc;

use crate::dict::{AbscissaStatus, FunctionsDict};
use crate::errors::CurveResult;
use crate::pipeline::CurveChanger;

/// Applies `f` to every abscissa value (spec §4.7's `TransformX`). Because
/// the dict shares one x-axis across all functions, this necessarily moves
/// every function at once; grounded on `curves_changers.py`'s `TransformX`,
/// which does the same under the assumption the caller supplies a
/// monotonic `f` (we do not re-sort: a non-monotonic `f` is a caller bug,
/// the same contract the original keeps).
pub struct TransformX {
    f: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl TransformX {
    pub fn new(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }
}

impl std::fmt::Debug for TransformX {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformX").field("f", &"<fn>").finish()
    }
}

impl CurveChanger for TransformX {
    fn name(&self) -> &'static str {
        "TransformX"
    }
    fn alter_curves(&self, dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let names: Vec<String> = dict.function_names().map(String::from).collect();
        let mut rebuilt = FunctionsDict::new();
        for name in names {
            for (x, y) in dict.get_ordered_xy(&name) {
                rebuilt.update(&name, (self.f)(x), y);
            }
        }
        Ok((rebuilt, AbscissaStatus::Unknown))
    }
}

/// Applies `f` to every y-value of the named function (or, if `target` is
/// `None`, of every function) without touching the x-axis. Grounded on
/// `curves_changers.py`'s `TransformY` / `SimpleTransform`.
pub struct TransformY {
    target: Option<String>,
    f: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl TransformY {
    pub fn new(target: Option<String>, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self { target, f: Arc::new(f) }
    }
}

impl std::fmt::Debug for TransformY {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformY").field("target", &self.target).field("f", &"<fn>").finish()
    }
}

impl CurveChanger for TransformY {
    fn name(&self) -> &'static str {
        "TransformY"
    }
    fn alter_curves(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let names: Vec<String> = match &self.target {
            Some(n) => vec![n.clone()],
            None => dict.function_names().map(String::from).collect(),
        };
        for name in names {
            let points: Vec<(f64, f64)> = dict.get_ordered_xy(&name).into_iter().map(|(x, y)| (x, (self.f)(y))).collect();
            dict.set_function(&name, &points);
        }
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

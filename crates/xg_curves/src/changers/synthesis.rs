use crate::aggregator::{Aggregator, Percentage};
use crate::dict::{AbscissaStatus, FunctionsDict};
use crate::errors::CurveResult;
use crate::pipeline::CurveChanger;

/// For every x, aggregates the values the `source` functions take there
/// (ignoring whichever are undefined) into a new function named
/// `output_name`. Requires a shared x-axis so "the values at this x" is a
/// well-formed notion across all sources. Grounded on
/// `curves_changers.py`'s `SyntheticFunction` boxplot stages (min/max/mean
/// per x), generalized over [`Aggregator`].
pub struct StatisticsOfFunctionsPerX {
    pub source: Vec<String>,
    pub output_name: String,
    pub aggregator: Box<dyn Aggregator>,
}

impl std::fmt::Debug for StatisticsOfFunctionsPerX {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticsOfFunctionsPerX").field("source", &self.source).field("output_name", &self.output_name).field("aggregator", &self.aggregator.name()).finish()
    }
}

impl CurveChanger for StatisticsOfFunctionsPerX {
    fn name(&self) -> &'static str {
        "StatisticsOfFunctionsPerX"
    }
    fn require_same_xaxis(&self) -> bool {
        true
    }
    fn alter_curves(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let xs: Vec<f64> = dict.xaxis_ordered().to_vec();
        let mut points = Vec::with_capacity(xs.len());
        for x in xs {
            let values: Vec<f64> = self.source.iter().filter_map(|name| dict.get_function_y(name, x)).collect();
            if !values.is_empty() {
                points.push((x, self.aggregator.combine(&values)));
            }
        }
        dict.set_function(&self.output_name, &points);
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

/// SUPPLEMENT: the count-of-defined-sources-per-x stage from
/// `curves_changers.py`'s `SyntheticCount`, which does not require a shared
/// x-axis because it is exactly the thing you'd run before establishing one.
#[derive(Debug, Clone)]
pub struct SyntheticCount {
    pub source: Vec<String>,
    pub output_name: String,
}

impl CurveChanger for SyntheticCount {
    fn name(&self) -> &'static str {
        "SyntheticCount"
    }
    fn alter_curves(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let xs: Vec<f64> = dict.xaxis_ordered().to_vec();
        let mut points = Vec::with_capacity(xs.len());
        for x in xs {
            let count = self.source.iter().filter(|name| dict.get_function_y(name, x).is_some()).count();
            if count > 0 {
                points.push((x, count as f64));
            }
        }
        dict.set_function(&self.output_name, &points);
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

/// SUPPLEMENT: `curves_changers.py`'s `SyntheticPercentage` — like
/// [`SyntheticCount`] but normalized by `source.len()` into a `[0, 1]`
/// fraction rather than a raw count.
#[derive(Debug, Clone)]
pub struct SyntheticPercentage {
    pub source: Vec<String>,
    pub output_name: String,
}

impl CurveChanger for SyntheticPercentage {
    fn name(&self) -> &'static str {
        "SyntheticPercentage"
    }
    fn alter_curves(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let percentage = Percentage { universe: self.source.len() };
        let xs: Vec<f64> = dict.xaxis_ordered().to_vec();
        let mut points = Vec::with_capacity(xs.len());
        for x in xs {
            let count = self.source.iter().filter(|name| dict.get_function_y(name, x).is_some()).count();
            if count > 0 {
                points.push((x, percentage.of_defined(count)));
            }
        }
        dict.set_function(&self.output_name, &points);
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

/// Adds (or overwrites) a function wholesale from caller-supplied points,
/// e.g. a reference curve computed outside the pipeline. Grounded on
/// `curves_changers.py`'s `AddCurve`.
#[derive(Debug, Clone)]
pub struct AddCurve {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

impl CurveChanger for AddCurve {
    fn name(&self) -> &'static str {
        "AddCurve"
    }
    fn alter_curves(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        dict.set_function(&self.name, &self.points);
        Ok((dict, AbscissaStatus::Unknown))
    }
}

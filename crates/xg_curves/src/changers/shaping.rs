use std::collections::BTreeMap;

use crate::aggregator::Aggregator;
use crate::dict::{AbscissaStatus, FunctionsDict};
use crate::errors::CurveResult;
use crate::pipeline::CurveChanger;

/// Drops every function with fewer than `min_points` defined values.
/// Grounded on `curves_changers.py`'s `RemoveSmallFunction`.
#[derive(Debug, Clone, Copy)]
pub struct RemoveSmallFunction {
    pub min_points: usize,
}

impl CurveChanger for RemoveSmallFunction {
    fn name(&self) -> &'static str {
        "RemoveSmallFunction"
    }
    fn alter_curves(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let doomed: Vec<String> = dict.function_names().filter(|n| dict.number_of_points(n) < self.min_points).map(String::from).collect();
        for name in doomed {
            dict.remove_function(&name);
        }
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

/// SUPPLEMENT: drops functions whose defined x-range
/// (`get_last_valid_x - get_first_valid_x`) is narrower than `min_x_range`
/// — a function can have plenty of points yet still cover a negligible
/// span, which `RemoveSmallFunction` alone cannot catch. Grounded on the
/// same intent as `curves_changers.py`'s `RemoveSmallFunction`, generalized
/// to the x-range rather than the point count.
#[derive(Debug, Clone, Copy)]
pub struct RemoveSmallCurve {
    pub min_x_range: f64,
}

impl CurveChanger for RemoveSmallCurve {
    fn name(&self) -> &'static str {
        "RemoveSmallCurve"
    }
    fn alter_curves(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let doomed: Vec<String> = dict
            .function_names()
            .filter(|n| match (dict.get_first_valid_x(n), dict.get_last_valid_x(n)) {
                (Some(lo), Some(hi)) => (hi - lo) < self.min_x_range,
                _ => true,
            })
            .map(String::from)
            .collect();
        for name in doomed {
            dict.remove_function(&name);
        }
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

/// SUPPLEMENT: truncates every function to the x-range shared by all of
/// them, cutting any x value past the smallest `get_last_valid_x` among
/// the dict's functions. Useful ahead of [`super::checks::CheckSameXAxis`]
/// when one run simply produced fewer samples than the others. Grounded on
/// `curves_changers.py`'s `QuantizeXAxis` docstring, which notes truncation
/// as the usual prerequisite to aligning curves of different lengths.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruncateToLowestX;

impl CurveChanger for TruncateToLowestX {
    fn name(&self) -> &'static str {
        "TruncateToLowestX"
    }
    fn alter_curves(&self, dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let names: Vec<String> = dict.function_names().map(String::from).collect();
        let Some(cutoff) = names.iter().filter_map(|n| dict.get_last_valid_x(n)).fold(None, |acc, x| Some(acc.map_or(x, |a: f64| a.min(x)))) else {
            return Ok((dict, AbscissaStatus::Unaltered));
        };
        let mut rebuilt = FunctionsDict::new();
        for name in names {
            for (x, y) in dict.get_ordered_xy(&name) {
                if x <= cutoff {
                    rebuilt.update(&name, x, y);
                }
            }
        }
        Ok((rebuilt, AbscissaStatus::Unknown))
    }
}

/// Validates that the abscissa is sorted and reports [`AbscissaStatus::Unaltered`].
/// `FunctionsDict::update` always keeps the abscissa sorted as points are
/// inserted, so there is nothing to actually reorder by the time this stage
/// runs; it exists (per `curves_changers.py`'s `SortAll`) for pipelines
/// built against a dict populated by code that is not trusted to call
/// `update` exclusively.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortAll;

impl CurveChanger for SortAll {
    fn name(&self) -> &'static str {
        "SortAll"
    }
    fn alter_curves(&self, dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        debug_assert!(dict.xaxis_ordered().windows(2).all(|w| w[0] <= w[1]));
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

/// Quantizes the abscissa onto an explicit, ascending list of levels: each
/// x is reassigned to the smallest level that is `>= x` ("slot_value =
/// right"), and every function's values landing on the same level are
/// reduced to one with `merge`. An x past every level is silently dropped
/// (spec §9 Open Questions: "the source behavior is to silently drop the
/// point... this spec preserves that"). Grounded on `curves_changers.py`'s
/// `QuantizeXAxis` and its worked example: `levels=[0,1,2,3]`,
/// `merge=max` turns `f=[(0.10,3),(1.10,5),(1.80,7),(2.30,9)]` into
/// `f=[(1,3),(2,7),(3,9)]` (1.10 and 1.80 both land on level 2, where max
/// picks 7).
pub struct QuantizeXAxis {
    pub levels: Vec<f64>,
    pub merge: Box<dyn Aggregator>,
}

impl QuantizeXAxis {
    /// `levels` must be sorted ascending; this is the caller's
    /// responsibility, the same way `curves_changers.py` trusts its
    /// breakpoint list to already be sorted.
    pub fn new(levels: Vec<f64>, merge: Box<dyn Aggregator>) -> Self {
        Self { levels, merge }
    }

    fn level_of(&self, x: f64) -> Option<f64> {
        self.levels.iter().find(|&&level| level >= x).copied()
    }
}

impl std::fmt::Debug for QuantizeXAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuantizeXAxis").field("levels", &self.levels).field("merge", &self.merge.name()).finish()
    }
}

impl CurveChanger for QuantizeXAxis {
    fn name(&self) -> &'static str {
        "QuantizeXAxis"
    }
    fn alter_curves(&self, dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let names: Vec<String> = dict.function_names().map(String::from).collect();
        let mut rebuilt = FunctionsDict::new();
        for name in &names {
            let mut buckets: BTreeMap<u64, Vec<f64>> = BTreeMap::new();
            for (x, y) in dict.get_ordered_xy(name) {
                if let Some(level) = self.level_of(x) {
                    buckets.entry(level.to_bits()).or_default().push(y);
                }
            }
            for (level_bits, values) in buckets {
                rebuilt.update(name, f64::from_bits(level_bits), self.merge.combine(&values));
            }
        }
        Ok((rebuilt, AbscissaStatus::Unknown))
    }
}

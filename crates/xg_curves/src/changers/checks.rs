use crate::dict::{AbscissaStatus, FunctionsDict};
use crate::errors::{CurveError, CurveResult};
use crate::pipeline::CurveChanger;

fn target_names(dict: &FunctionsDict, only: &Option<Vec<String>>) -> Vec<String> {
    match only {
        Some(names) => names.clone(),
        None => dict.function_names().map(String::from).collect(),
    }
}

/// Fails unless every targeted function is defined at every abscissa value.
/// With `only: None` (the common case) this checks the whole dict and, on
/// success, reports [`AbscissaStatus::SameX`] so later same-axis-requiring
/// stages can run. Grounded on `curves_changers.py`'s
/// `CheckSameXAxisAndLengthCurvesChanger`.
#[derive(Debug, Clone, Default)]
pub struct CheckSameXAxis {
    pub only: Option<Vec<String>>,
}

impl CurveChanger for CheckSameXAxis {
    fn name(&self) -> &'static str {
        "CheckSameXAxis"
    }
    fn alter_curves(&self, dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let names = target_names(&dict, &self.only);
        for x in dict.xaxis_ordered() {
            for name in &names {
                if dict.get_function_y(name, *x).is_none() {
                    return Err(CurveError::UndefinedCell { check: self.name(), function: name.clone(), x: *x });
                }
            }
        }
        let status = if self.only.is_none() { AbscissaStatus::SameX } else { AbscissaStatus::Unaltered };
        Ok((dict, status))
    }
}

/// Same check as [`CheckSameXAxis`] but phrased per-function (spec §4.7's
/// `CheckNoNaN`): fails on the first undefined cell among the targeted
/// functions. Functionally identical when `only` covers every function;
/// kept distinct because `curves_changers.py` exposes them as separate,
/// differently-named stages and callers reach for whichever name reads
/// better at the call site.
#[derive(Debug, Clone, Default)]
pub struct CheckNoNaN {
    pub only: Option<Vec<String>>,
}

impl CurveChanger for CheckNoNaN {
    fn name(&self) -> &'static str {
        "CheckNoNaN"
    }
    fn alter_curves(&self, dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let names = target_names(&dict, &self.only);
        for name in &names {
            for x in dict.xaxis_ordered() {
                if dict.get_function_y(name, *x).is_none() {
                    return Err(CurveError::UndefinedCell { check: self.name(), function: name.clone(), x: *x });
                }
            }
        }
        let status = if self.only.is_none() { AbscissaStatus::SameX } else { AbscissaStatus::Unaltered };
        Ok((dict, status))
    }
}

/// Fails if any targeted function holds a `NaN` or `±inf` value anywhere.
/// Strictly stronger than [`CheckNoNaN`] (also rejects infinities), per
/// `curves_changers.py`'s `CheckNoInvalidValues`.
#[derive(Debug, Clone, Default)]
pub struct CheckNoInvalidNumbers {
    pub only: Option<Vec<String>>,
}

impl CurveChanger for CheckNoInvalidNumbers {
    fn name(&self) -> &'static str {
        "CheckNoInvalidNumbers"
    }
    fn alter_curves(&self, dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let names = target_names(&dict, &self.only);
        for name in &names {
            for &x in dict.xaxis_ordered() {
                if let Some(y) = dict.get_raw_function_y(name, x) {
                    if !y.is_finite() {
                        return Err(CurveError::InvalidNumber { function: name.clone(), x, value: y });
                    }
                }
            }
        }
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

use crate::dict::{AbscissaStatus, FunctionsDict};
use crate::errors::{CurveError, CurveResult};
use crate::pipeline::CurveChanger;

/// If a function's first cell is undefined, set it to `value`. Leaves every
/// other cell untouched. Grounded on `curves_changers.py`'s
/// `RemapInvalidValues`'s "fix the boundary" special case.
#[derive(Debug, Clone, Copy)]
pub struct ReplaceFirstNaN {
    pub value: f64,
}

impl CurveChanger for ReplaceFirstNaN {
    fn name(&self) -> &'static str {
        "ReplaceFirstNaN"
    }
    fn alter_curves(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        if let Some(&x0) = dict.xaxis_ordered().first() {
            let names: Vec<String> = dict.function_names().map(String::from).collect();
            for name in names {
                if dict.get_function_y(&name, x0).is_none() {
                    dict.update(&name, x0, self.value);
                }
            }
        }
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

/// Mirror image of [`ReplaceFirstNaN`]: fixes an undefined last cell.
#[derive(Debug, Clone, Copy)]
pub struct ReplaceTailNaN {
    pub value: f64,
}

impl CurveChanger for ReplaceTailNaN {
    fn name(&self) -> &'static str {
        "ReplaceTailNaN"
    }
    fn alter_curves(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        if let Some(&xn) = dict.xaxis_ordered().last() {
            let names: Vec<String> = dict.function_names().map(String::from).collect();
            for name in names {
                if dict.get_function_y(&name, xn).is_none() {
                    dict.update(&name, xn, self.value);
                }
            }
        }
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

/// Forward-fills every undefined cell from the nearest preceding defined
/// value, per function. Errors with [`CurveError::NoPreviousValue`] if a
/// function's very first cell is itself undefined — there is nothing to
/// carry forward. Grounded on `curves_changers.py`'s
/// `RemapInvalidValues(remap_function=lambda prev, cur: prev)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceNaNWithPrevious;

impl CurveChanger for ReplaceNaNWithPrevious {
    fn name(&self) -> &'static str {
        "ReplaceNaNWithPrevious"
    }
    fn alter_curves(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let xs: Vec<f64> = dict.xaxis_ordered().to_vec();
        let names: Vec<String> = dict.function_names().map(String::from).collect();
        for name in names {
            let mut previous: Option<f64> = None;
            for &x in &xs {
                match dict.get_function_y(&name, x) {
                    Some(y) => previous = Some(y),
                    None => match previous {
                        Some(y) => dict.update(&name, x, y),
                        None => return Err(CurveError::NoPreviousValue(name)),
                    },
                }
            }
        }
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

/// Like [`ReplaceNaNWithPrevious`], but undefined cells with no preceding
/// value (a run of leading NaNs) are filled with `first_value` instead of
/// erroring. Grounded on the worked scenario in spec §4.7/§8:
/// `g = [(0, NaN), (2, 5)]` through `ReplaceNaNWithStops(first_value=10)`
/// yields `g = [(0, 10), (2, 5)]`.
#[derive(Debug, Clone, Copy)]
pub struct ReplaceNaNWithStops {
    pub first_value: f64,
}

impl CurveChanger for ReplaceNaNWithStops {
    fn name(&self) -> &'static str {
        "ReplaceNaNWithStops"
    }
    fn alter_curves(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let xs: Vec<f64> = dict.xaxis_ordered().to_vec();
        let names: Vec<String> = dict.function_names().map(String::from).collect();
        for name in names {
            let mut previous: Option<f64> = None;
            for &x in &xs {
                match dict.get_function_y(&name, x) {
                    Some(y) => previous = Some(y),
                    None => {
                        let fill = previous.unwrap_or(self.first_value);
                        dict.update(&name, x, fill);
                        previous = Some(fill);
                    }
                }
            }
        }
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

/// SUPPLEMENT: fills every remaining undefined cell of one named function
/// with a constant, regardless of position. Grounded on
/// `curves_changers.py`'s `RemapInvalidValues(remap_function=lambda _, __:
/// constant)` specialization, used there to flatten a sentinel curve.
#[derive(Debug, Clone)]
pub struct UseValueToFillCurve {
    pub function: String,
    pub value: f64,
}

impl CurveChanger for UseValueToFillCurve {
    fn name(&self) -> &'static str {
        "UseValueToFillCurve"
    }
    fn alter_curves(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let xs: Vec<f64> = dict.xaxis_ordered().to_vec();
        for x in xs {
            if dict.get_function_y(&self.function, x).is_none() {
                dict.update(&self.function, x, self.value);
            }
        }
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

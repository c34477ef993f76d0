//! The functions dictionary (spec §4.6, C7): a columnar store, one column
//! per function, sharing a single sorted abscissa. Undefined cells are NaN.
//!
//! Grounded on `original_source/PhdTester/phdTester/functions.py`'s
//! `DataFrameFunctionsDict` (a `pandas.DataFrame`-backed implementation);
//! re-expressed here as a plain `Vec<f64>` abscissa plus one `Vec<f64>`
//! per function, since spec §9 explicitly allows "columnar arrays... or a
//! dataframe library" as long as the ordering and NaN semantics hold.

use indexmap::IndexMap;

use crate::errors::{CurveError, CurveResult};

/// Tag carried alongside a [`FunctionsDict`] by the curve pipeline (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbscissaStatus {
    /// Every function is defined at every abscissa value (no NaN cells).
    SameX,
    /// The producing changer did not add, remove, or re-key any x value.
    Unaltered,
    /// The caller must re-verify before relying on a shared x-axis.
    Unknown,
}

/// `get_statistics`'s return value (spec §4.6): summary statistics over a
/// function's non-NaN values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxData {
    pub count: usize,
    pub min: f64,
    pub lower_percentile: f64,
    pub median: f64,
    pub mean: f64,
    pub upper_percentile: f64,
    pub max: f64,
    /// Sample standard deviation (ddof = 1); `NaN` when `count < 2`.
    pub std: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FunctionsDict {
    abscissa: Vec<f64>,
    columns: IndexMap<String, Vec<f64>>,
}

impl FunctionsDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an empty dict with the given function names already present
    /// (all-NaN), sized to `size` abscissa slots of NaN. Mirrors
    /// `DataFrameFunctionsDict.empty`, used by changers (e.g. `TransformX`)
    /// that build a fresh result rather than mutating in place.
    pub fn empty(names: impl IntoIterator<Item = String>, size: usize) -> Self {
        let mut dict = Self::new();
        dict.abscissa = vec![f64::NAN; size];
        for name in names {
            dict.columns.insert(name, vec![f64::NAN; size]);
        }
        dict
    }

    fn x_index(&self, x: f64) -> Result<usize, usize> {
        self.abscissa.binary_search_by(|probe| probe.partial_cmp(&x).expect("abscissa values must be finite, non-NaN"))
    }

    /// Insert (or, for an existing `(name, x)`, overwrite) one cell.
    /// Idempotent on `(name, x)`; inserts a new column on first use and a
    /// new row on first use of `x`.
    pub fn update(&mut self, name: &str, x: f64, y: f64) {
        let idx = match self.x_index(x) {
            Ok(idx) => idx,
            Err(insert_at) => {
                self.abscissa.insert(insert_at, x);
                for column in self.columns.values_mut() {
                    column.insert(insert_at, f64::NAN);
                }
                insert_at
            }
        };
        let column = self.columns.entry(name.to_string()).or_insert_with(|| vec![f64::NAN; self.abscissa.len()]);
        if column.len() < self.abscissa.len() {
            column.resize(self.abscissa.len(), f64::NAN);
        }
        column[idx] = y;
    }

    /// Replace a function's entire series (used by changers that rebuild a
    /// function wholesale, e.g. a single-function transform).
    pub fn set_function(&mut self, name: &str, points: &[(f64, f64)]) {
        self.remove_function(name);
        for &(x, y) in points {
            self.update(name, x, y);
        }
    }

    /// Set a cell to NaN; drops the row entirely if every function is then
    /// undefined at `x` (spec §4.6: "drop-only-if-every-function-is-
    /// undefined-at-x"; we drop eagerly rather than lazily).
    pub fn remove_point(&mut self, name: &str, x: f64) {
        let Ok(idx) = self.x_index(x) else { return };
        if let Some(column) = self.columns.get_mut(name) {
            column[idx] = f64::NAN;
        }
        if self.columns.values().all(|c| c[idx].is_nan()) {
            self.abscissa.remove(idx);
            for column in self.columns.values_mut() {
                column.remove(idx);
            }
        }
    }

    /// Remove a function (and all of its points) entirely. The abscissa is
    /// untouched even if this was the only function defined at some x.
    pub fn remove_function(&mut self, name: &str) {
        self.columns.shift_remove(name);
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn xaxis_ordered(&self) -> &[f64] {
        &self.abscissa
    }

    /// The largest `number_of_points` across all functions.
    pub fn max_function_length(&self) -> usize {
        self.columns.values().map(|c| c.iter().filter(|y| !y.is_nan()).count()).max().unwrap_or(0)
    }

    pub fn number_of_points(&self, name: &str) -> usize {
        self.columns.get(name).map(|c| c.iter().filter(|y| !y.is_nan()).count()).unwrap_or(0)
    }

    pub fn get_first_x(&self) -> Option<f64> {
        self.abscissa.first().copied()
    }

    pub fn get_last_x(&self) -> Option<f64> {
        self.abscissa.last().copied()
    }

    pub fn get_first_valid_x(&self, name: &str) -> Option<f64> {
        let column = self.columns.get(name)?;
        self.abscissa.iter().zip(column).find(|(_, y)| !y.is_nan()).map(|(x, _)| *x)
    }

    pub fn get_last_valid_x(&self, name: &str) -> Option<f64> {
        let column = self.columns.get(name)?;
        self.abscissa.iter().zip(column).rev().find(|(_, y)| !y.is_nan()).map(|(x, _)| *x)
    }

    /// True iff there is not a single NaN cell anywhere in the dict (spec
    /// §4.6's literal definition — stronger than "every function shares the
    /// same defined x-set" whenever a function is simply shorter than the
    /// shared abscissa).
    pub fn functions_share_same_xaxis(&self) -> bool {
        self.columns.values().all(|c| c.iter().all(|y| !y.is_nan()))
    }

    pub fn get_function_y(&self, name: &str, x: f64) -> Option<f64> {
        let idx = self.x_index(x).ok()?;
        self.columns.get(name).map(|c| c[idx]).filter(|y| !y.is_nan())
    }

    /// Like [`Self::get_function_y`], but returns the raw cell even when it
    /// is `NaN` or `±inf`. `None` only when the function or the x value is
    /// absent entirely. Used by checks that must distinguish "undefined"
    /// from "invalid" (e.g. `±inf`), which `get_function_y` collapses.
    pub fn get_raw_function_y(&self, name: &str, x: f64) -> Option<f64> {
        let idx = self.x_index(x).ok()?;
        self.columns.get(name).map(|c| c[idx])
    }

    /// The non-NaN `(x, y)` points of a function, in abscissa order.
    pub fn get_ordered_xy(&self, name: &str) -> Vec<(f64, f64)> {
        match self.columns.get(name) {
            Some(column) => self.abscissa.iter().zip(column).filter(|(_, y)| !y.is_nan()).map(|(x, y)| (*x, *y)).collect(),
            None => Vec::new(),
        }
    }

    pub fn max_of_function(&self, name: &str) -> Option<f64> {
        self.columns.get(name)?.iter().filter(|y| !y.is_nan()).copied().fold(None, |acc, y| Some(acc.map_or(y, |a: f64| a.max(y))))
    }

    /// `(name, dense (x, y) sequence without NaN gaps)` for every function,
    /// insertion order.
    pub fn items(&self) -> impl Iterator<Item = (&str, Vec<(f64, f64)>)> {
        self.columns.keys().map(move |name| (name.as_str(), self.get_ordered_xy(name)))
    }

    /// Replace every `±inf` and `NaN` cell, dict-wide, with `value`.
    pub fn replace_invalid_values(&mut self, value: f64) {
        for column in self.columns.values_mut() {
            for y in column.iter_mut() {
                if y.is_nan() || y.is_infinite() {
                    *y = value;
                }
            }
        }
    }

    /// Summary statistics over `name`'s non-NaN values (spec §4.6).
    /// `lower_q`/`upper_q` are fractions in `[0, 1]`; both quantiles use
    /// linear interpolation between closest ranks.
    pub fn get_statistics(&self, name: &str, lower_q: f64, upper_q: f64) -> CurveResult<BoxData> {
        let mut values: Vec<f64> = self.columns.get(name).ok_or_else(|| CurveError::UnknownFunction(name.to_string()))?.iter().copied().filter(|y| !y.is_nan()).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let count = values.len();
        let quantile = |q: f64| -> f64 {
            if values.is_empty() {
                return f64::NAN;
            }
            let pos = q * (count - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            if lo == hi {
                values[lo]
            } else {
                values[lo] + (values[hi] - values[lo]) * (pos - lo as f64)
            }
        };
        let mean = if count == 0 { f64::NAN } else { values.iter().sum::<f64>() / count as f64 };
        let std = if count < 2 {
            f64::NAN
        } else {
            let variance = values.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        };
        Ok(BoxData {
            count,
            min: values.first().copied().unwrap_or(f64::NAN),
            lower_percentile: quantile(lower_q),
            median: quantile(0.5),
            mean,
            upper_percentile: quantile(upper_q),
            max: values.last().copied().unwrap_or(f64::NAN),
            std,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_keeps_abscissa_sorted_and_backfills_nan() {
        let mut dict = FunctionsDict::new();
        dict.update("f", 2.0, 20.0);
        dict.update("f", 0.0, 0.0);
        dict.update("g", 1.0, 10.0);
        assert_eq!(dict.xaxis_ordered(), &[0.0, 1.0, 2.0]);
        assert_eq!(dict.get_function_y("f", 0.0), Some(0.0));
        assert_eq!(dict.get_function_y("f", 1.0), None);
        assert_eq!(dict.get_function_y("g", 2.0), None);
    }

    #[test]
    fn remove_point_drops_the_row_only_when_every_function_is_undefined() {
        let mut dict = FunctionsDict::new();
        dict.update("f", 0.0, 1.0);
        dict.update("g", 0.0, 2.0);
        dict.remove_point("f", 0.0);
        assert_eq!(dict.xaxis_ordered(), &[0.0]);
        dict.remove_point("g", 0.0);
        assert!(dict.xaxis_ordered().is_empty());
    }

    #[test]
    fn functions_share_same_xaxis_requires_every_cell_defined() {
        let mut dict = FunctionsDict::new();
        dict.update("f", 0.0, 1.0);
        dict.update("f", 1.0, 2.0);
        dict.update("g", 0.0, 3.0);
        assert!(!dict.functions_share_same_xaxis());
        dict.update("g", 1.0, 4.0);
        assert!(dict.functions_share_same_xaxis());
    }

    #[test]
    fn get_statistics_matches_hand_computed_values() {
        let mut dict = FunctionsDict::new();
        for (i, y) in [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().enumerate() {
            dict.update("f", i as f64, y);
        }
        let stats = dict.get_statistics("f", 0.25, 0.75).unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.mean, 3.0);
        assert!((stats.std - 1.5811388300841898).abs() < 1e-9);
    }

    #[test]
    fn get_statistics_std_is_nan_below_two_samples() {
        let mut dict = FunctionsDict::new();
        dict.update("f", 0.0, 1.0);
        let stats = dict.get_statistics("f", 0.25, 0.75).unwrap();
        assert_eq!(stats.count, 1);
        assert!(stats.std.is_nan());
    }

    #[test]
    fn get_statistics_rejects_unknown_function() {
        let dict = FunctionsDict::new();
        assert!(matches!(dict.get_statistics("missing", 0.25, 0.75), Err(CurveError::UnknownFunction(_))));
    }
}

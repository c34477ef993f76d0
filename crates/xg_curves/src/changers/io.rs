use std::fs;
use std::path::PathBuf;

use crate::dict::{AbscissaStatus, FunctionsDict};
use crate::errors::{CurveError, CurveResult};
use crate::pipeline::CurveChanger;

/// Writes the dict to a plain CSV file (one `x` column, one column per
/// function, empty cell for an undefined value) and passes the dict
/// through unchanged. No crate in this workspace's corpus depends on a CSV
/// library, so this is a hand-written writer in the same vein as the
/// plain-text artifact writers used elsewhere in this workspace, rather
/// than a dependency pulled in for one stage. Grounded on
/// `curves_changers.py`'s `SaveFunctionsToFile`.
#[derive(Debug, Clone)]
pub struct SaveOnCsv {
    pub path: PathBuf,
}

impl CurveChanger for SaveOnCsv {
    fn name(&self) -> &'static str {
        "SaveOnCsv"
    }
    fn alter_curves(&self, dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let names: Vec<&str> = dict.function_names().collect();
        let mut out = String::from("x");
        for name in &names {
            out.push(',');
            out.push_str(&csv_escape(name));
        }
        out.push('\n');
        for &x in dict.xaxis_ordered() {
            out.push_str(&x.to_string());
            for name in &names {
                out.push(',');
                if let Some(y) = dict.get_function_y(name, x) {
                    out.push_str(&y.to_string());
                }
            }
            out.push('\n');
        }
        fs::write(&self.path, out).map_err(|source| CurveError::Io { path: self.path.display().to_string(), source })?;
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

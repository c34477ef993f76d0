use crate::dict::{AbscissaStatus, FunctionsDict};
use crate::errors::CurveResult;
use crate::pipeline::CurveChanger;

/// Passes the dict through unchanged. Useful as a placeholder stage or a
/// pipeline-building default, mirroring `curves_changers.py`'s `Identity`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl CurveChanger for Identity {
    fn name(&self) -> &'static str {
        "Identity"
    }
    fn alter_curves(&self, dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

/// Logs a one-line summary of the dict's shape to stdout and passes it
/// through unchanged. Grounded on `curves_changers.py`'s `PrintCurves`
/// debugging stage.
#[derive(Debug, Clone)]
pub struct Print {
    pub label: String,
}

impl Print {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl CurveChanger for Print {
    fn name(&self) -> &'static str {
        "Print"
    }
    fn alter_curves(&self, dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let names: Vec<&str> = dict.function_names().collect();
        println!("[{}] {} points, functions: {:?}", self.label, dict.xaxis_ordered().len(), names);
        Ok((dict, AbscissaStatus::Unaltered))
    }
}

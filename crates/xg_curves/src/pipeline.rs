//! The curve-changer pipeline (spec §4.7, C8).
//!
//! Grounded on `original_source/PhdTester/phdTester/image_computer/
//! curves_changers.py`'s `AbstractTransform.apply_to` chain and the runner
//! that calls each changer in turn (`function_computer.py`'s pipeline
//! loop): each changer receives the dict produced by the one before it and
//! returns a (possibly rebuilt) dict plus a declaration of what it did to
//! the shared x-axis.

use crate::dict::{AbscissaStatus, FunctionsDict};
use crate::errors::{CurveError, CurveResult};

/// One stage of the pipeline. `require_same_xaxis` lets the pipeline refuse
/// to run a changer that assumes every function is densely defined (e.g.
/// `StatisticsOfFunctionsPerX`) until an earlier stage has actually
/// established that.
pub trait CurveChanger {
    fn name(&self) -> &'static str;

    /// If true, the pipeline rejects this changer with
    /// [`CurveError::NotNormalized`] unless the running status is
    /// [`AbscissaStatus::SameX`].
    fn require_same_xaxis(&self) -> bool {
        false
    }

    /// Transform `dict` and report what happened to the abscissa.
    /// Returning [`AbscissaStatus::Unaltered`] tells the pipeline to keep
    /// whatever status it was already tracking; any other value replaces it.
    fn alter_curves(&self, dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)>;
}

/// Runs a sequence of [`CurveChanger`]s, folding their reported
/// [`AbscissaStatus`] into a running value the way `functions.py`'s runner
/// tracks "has the x-axis been normalized yet" across stages.
pub struct Pipeline {
    stages: Vec<Box<dyn CurveChanger>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn with_stage(mut self, stage: Box<dyn CurveChanger>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Run every stage in order, starting from [`AbscissaStatus::Unknown`].
    /// A stage reporting [`AbscissaStatus::Unaltered`] leaves the running
    /// status exactly as it was (so a `SameX` status survives an `Unaltered`
    /// stage, but an `Unknown` one does too); any other reported status
    /// replaces it outright.
    pub fn run(&self, mut dict: FunctionsDict) -> CurveResult<(FunctionsDict, AbscissaStatus)> {
        let mut current = AbscissaStatus::Unknown;
        for stage in &self.stages {
            if stage.require_same_xaxis() && current != AbscissaStatus::SameX {
                return Err(CurveError::NotNormalized { changer: stage.name() });
            }
            let (next_dict, reported) = stage.alter_curves(dict)?;
            dict = next_dict;
            current = match reported {
                AbscissaStatus::Unaltered => current,
                other => other,
            };
        }
        Ok((dict, current))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

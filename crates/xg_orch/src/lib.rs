//! xg_orch — the orchestrator (spec §4.9, C10).
//!
//! Glues every other crate together: [`xg_deps::graph::OptionGraph`] +
//! [`xg_enum::enumerator::enumerate_combinations`] produce the deduplicated,
//! compliant stream of test contexts this crate drives one external process
//! per context for; [`output::OutputTemplate`] + [`xg_store`] archive the
//! result; [`ingest::load_functions_dict`] reads it back as a
//! [`xg_curves::dict::FunctionsDict`] for [`xg_curves::pipeline::Pipeline`]
//! to transform.
//!
//! Grounded on `vm_cli::main::run`'s "resolve inputs → drive the pipeline →
//! write artifacts → report a final status" shape (spec §2's data flow: "C1
//! → C4 → C5 → C10 (driver) → external program → C9 → C7 → C8 → C10
//! (emission)").

#![forbid(unsafe_code)]

pub mod errors;
pub mod ingest;
pub mod invocation;
pub mod orchestrator;
pub mod output;
pub mod reporter;
pub mod status;

pub mod prelude {
    pub use crate::errors::{OrchestratorError, OrchestratorResult};
    pub use crate::ingest::{load_functions_dict, parse_functions_dict_csv};
    pub use crate::invocation::{CommandBuilder, ExternalInvocation, FixedProgram};
    pub use crate::orchestrator::{ContextOutcome, FailurePolicy, Orchestrator, RunSummary};
    pub use crate::output::{OutputTemplate, SingleFileTemplate};
    pub use crate::reporter::{ConsoleReporter, Reporter, SilentReporter};
    pub use crate::status::ContextStatus;
}

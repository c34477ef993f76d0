//! The external executable contract (spec §6): a caller-supplied command
//! line, constructed from a test context, that the orchestrator spawns and
//! waits on.

use std::path::PathBuf;

use xg_core::bundle::TestContext;

/// One external-program invocation: program, arguments, and the working
/// directory the orchestrator hands it (spec §6: "the executable must ...
/// respect the working directory it is handed").
#[derive(Debug, Clone)]
pub struct ExternalInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl ExternalInvocation {
    pub fn new(program: impl Into<String>, args: Vec<String>, cwd: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args, cwd: cwd.into() }
    }

    /// A human-readable command line, used only for diagnostics (spec §7:
    /// `ExternalProgramFailureError` "carries cwd, command line, exit code").
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone()).chain(self.args.iter().cloned()).collect::<Vec<_>>().join(" ")
    }
}

/// Builds the command line for one test context. Implementations translate
/// option values into CLI flags for the specific external program under
/// study; that translation is out of this crate's scope (spec §1), so this
/// trait is the seam a caller plugs into.
pub trait CommandBuilder {
    fn build(&self, tc: &TestContext) -> ExternalInvocation;
}

/// A `CommandBuilder` that runs the same program for every context, passing
/// a caller-supplied flag-rendering closure's output as arguments and a
/// fixed working directory. Covers the common case without requiring a new
/// type per experiment.
pub struct FixedProgram<F> {
    pub program: String,
    pub cwd: PathBuf,
    pub render_args: F,
}

impl<F> CommandBuilder for FixedProgram<F>
where
    F: Fn(&TestContext) -> Vec<String>,
{
    fn build(&self, tc: &TestContext) -> ExternalInvocation {
        ExternalInvocation::new(self.program.clone(), (self.render_args)(tc), self.cwd.clone())
    }
}

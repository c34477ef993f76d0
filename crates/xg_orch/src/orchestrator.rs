//! The orchestrator itself (spec §4.9, C10): drives the per-context state
//! machine sequentially over a set of enumerated test contexts, spawning one
//! external process per context and relocating its output artifact into the
//! resource store.
//!
//! Grounded on `vm_cli::main::run`'s "resolve inputs, run the fixed
//! pipeline, write artifacts, report a final status line" shape, narrowed to
//! this spec's simpler per-context state machine (spec §4.9) and its
//! single-threaded, cooperative scheduling model (spec §5): the orchestrator
//! never spawns two external processes concurrently.

use std::fs;
use std::process::Command;

use xg_core::bundle::TestContext;
use xg_store::content::Content;
use xg_store::manager::ResourceManager;

use crate::errors::{OrchestratorError, OrchestratorResult};
use crate::invocation::CommandBuilder;
use crate::output::OutputTemplate;
use crate::reporter::Reporter;
use crate::status::ContextStatus;

/// What to do when one test context's external program fails. Spec §7:
/// "ExternalProgramFailureError is fatal per test context but the
/// orchestrator continues with the next context (policy is configurable;
/// default is propagate)".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run at the first failure (the spec's default).
    Propagate,
    /// Record the failure and keep going.
    ContinueOnFailure,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Propagate
    }
}

/// The terminal status of one test context, plus enough detail to explain a
/// `Failed` outcome without re-deriving it from the error.
#[derive(Debug)]
pub struct ContextOutcome<'a> {
    pub context: &'a TestContext,
    pub status: ContextStatus,
    pub error: Option<OrchestratorError>,
}

/// Aggregate counts for a whole run (spec §7: "non-fatal drops are counted,
/// not listed").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.completed + self.failed + self.skipped
    }
}

pub struct Orchestrator<'s> {
    store: &'s mut dyn ResourceManager,
    policy: FailurePolicy,
}

impl<'s> Orchestrator<'s> {
    pub fn new(store: &'s mut dyn ResourceManager) -> Self {
        Self { store, policy: FailurePolicy::default() }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the state machine over every context in order (spec §5:
    /// enumeration order is deterministic and must be preserved). Returns
    /// the terminal outcome of each context plus the aggregate summary; on
    /// [`FailurePolicy::Propagate`], the first `Failed` outcome's error is
    /// also returned as `Err` and no further contexts run.
    pub fn run<'c>(
        &mut self,
        contexts: &'c [TestContext],
        commands: &dyn CommandBuilder,
        output: &dyn OutputTemplate,
        reporter: &dyn Reporter,
    ) -> Result<(Vec<ContextOutcome<'c>>, RunSummary), OrchestratorError> {
        let mut outcomes = Vec::with_capacity(contexts.len());
        let mut summary = RunSummary::default();
        let total = contexts.len();

        for (index, tc) in contexts.iter().enumerate() {
            reporter.context_transition(index, total, ContextStatus::New);
            let key = output.artifact_key(tc);

            // NEW → SKIPPED: the expected artifact already exists (spec
            // §4.9's idempotent-rerun gate).
            if self.store.contains(&key) {
                reporter.context_transition(index, total, ContextStatus::Skipped);
                summary.skipped += 1;
                outcomes.push(ContextOutcome { context: tc, status: ContextStatus::Skipped, error: None });
                continue;
            }

            reporter.context_transition(index, total, ContextStatus::Submitted);
            let invocation = commands.build(tc);
            reporter.context_transition(index, total, ContextStatus::Running);

            let spawn_result = Command::new(&invocation.program).args(&invocation.args).current_dir(&invocation.cwd).status();

            let outcome_result = match spawn_result {
                Err(source) => Err(OrchestratorError::SpawnFailed { cwd: invocation.cwd.clone(), command_line: invocation.command_line(), source }),
                Ok(status) if !status.success() => Err(OrchestratorError::ExternalProgramFailure {
                    cwd: invocation.cwd.clone(),
                    command_line: invocation.command_line(),
                    exit_code: status.code(),
                }),
                Ok(_) => self.relocate(tc, &invocation.cwd, output, &key),
            };

            match outcome_result {
                Ok(()) => {
                    reporter.context_transition(index, total, ContextStatus::Completed);
                    summary.completed += 1;
                    outcomes.push(ContextOutcome { context: tc, status: ContextStatus::Completed, error: None });
                }
                Err(err) => {
                    reporter.context_transition(index, total, ContextStatus::Failed);
                    summary.failed += 1;
                    if self.policy == FailurePolicy::Propagate {
                        reporter.run_complete(summary.completed, summary.failed, summary.skipped);
                        return Err(err);
                    }
                    outcomes.push(ContextOutcome { context: tc, status: ContextStatus::Failed, error: Some(err) });
                }
            }
        }

        reporter.run_complete(summary.completed, summary.failed, summary.skipped);
        Ok((outcomes, summary))
    }

    /// RUNNING → COMPLETED: read the artifact the external program wrote at
    /// its expected local path and relocate it into the store, keyed for
    /// future idempotent-rerun checks. A 0 exit with no artifact present is
    /// still a failure (spec §6: "the executable must write exactly the
    /// artifacts declared by its output template, exit 0 on success ...
    /// Anything else is FAILED").
    fn relocate(&mut self, tc: &TestContext, cwd: &std::path::Path, output: &dyn OutputTemplate, key: &xg_store::key::ArtifactKey) -> OrchestratorResult<()> {
        let local_path = output.local_path(tc, cwd);
        let bytes = fs::read(&local_path).map_err(|source| OrchestratorError::Relocate { path: local_path.clone(), source })?;
        let content = if key.data_type.eq_ignore_ascii_case("csv") {
            Content::Tabular(xg_store::content::parse_csv(&bytes))
        } else {
            Content::Bytes(bytes)
        };
        self.store.save_at(key, content)?;
        Ok(())
    }
}

//! The per-test-context state machine (spec §4.9):
//!
//! ```text
//! NEW → SUBMITTED → RUNNING → COMPLETED | FAILED | SKIPPED
//! ```
//!
//! `SUBMITTED → RUNNING` is observational only — the core does not manage
//! the external process's lifecycle beyond spawn-and-wait, so this crate
//! never actually holds a context in `Running` between two distinct calls;
//! it is reported to a [`crate::reporter::Reporter`] for visibility and then
//! immediately resolved to a terminal status.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextStatus {
    New,
    Submitted,
    Running,
    Completed,
    Failed,
    Skipped,
}

impl ContextStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ContextStatus::Completed | ContextStatus::Failed | ContextStatus::Skipped)
    }
}

impl std::fmt::Display for ContextStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContextStatus::New => "NEW",
            ContextStatus::Submitted => "SUBMITTED",
            ContextStatus::Running => "RUNNING",
            ContextStatus::Completed => "COMPLETED",
            ContextStatus::Failed => "FAILED",
            ContextStatus::Skipped => "SKIPPED",
        };
        f.write_str(s)
    }
}

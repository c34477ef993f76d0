//! Progress reporting (spec §9's ambient-stack carry-over: no tracing/log
//! facade, `println!`/`eprintln!` at the boundary). The orchestrator never
//! blocks on a reporter and never lets one change its control flow.

use crate::status::ContextStatus;

pub trait Reporter {
    fn context_transition(&self, index: usize, total: usize, status: ContextStatus);
    fn run_complete(&self, completed: usize, failed: usize, skipped: usize);
}

/// The default reporter: one line per terminal transition on stdout, mirroring
/// this workspace's CLI convention of a short prefix plus a `key=value` tail.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn context_transition(&self, index: usize, total: usize, status: ContextStatus) {
        if status.is_terminal() {
            println!("xg: context {index}/{total} {status}");
        }
    }

    fn run_complete(&self, completed: usize, failed: usize, skipped: usize) {
        println!("xg: completed={completed} failed={failed} skipped={skipped}");
    }
}

/// A reporter that stays silent. Useful for library callers and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn context_transition(&self, _index: usize, _total: usize, _status: ContextStatus) {}
    fn run_complete(&self, _completed: usize, _failed: usize, _skipped: usize) {}
}

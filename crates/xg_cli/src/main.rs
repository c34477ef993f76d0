// crates/xg_cli/src/main.rs
//
// xg — CLI entrypoint.
// Loads an experiment-definition manifest, builds the option dependency
// graph it declares, enumerates the compliant test contexts, and drives the
// orchestrator over them one external-process invocation at a time.
//
// Strictly offline: the only process this binary ever spawns is the one the
// manifest names.

mod args;
mod command;
mod config;
mod errors;

use std::process::ExitCode;

use args::{parse_and_validate, Args};
use command::{TemplateCommandBuilder, TemplateOutputTemplate};
use errors::CliRunError;
use xg_enum::enumerator::enumerate_combinations;
use xg_orch::orchestrator::{FailurePolicy, Orchestrator};
use xg_orch::reporter::{ConsoleReporter, Reporter, SilentReporter};
use xg_store::local::LocalStore;

fn main() -> ExitCode {
    let args = match parse_and_validate() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("xg: error: {e}");
            return ExitCode::from(1);
        }
    };

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("xg: error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<ExitCode, CliRunError> {
    let experiment = config::load_experiment(&args.manifest)?;
    let contexts = enumerate_combinations(&experiment.graph, &experiment.candidates);

    if !args.quiet {
        println!(
            "xg: {} option(s) declared, {} compliant context(s) enumerated",
            experiment.graph.option_names().count(),
            contexts.len()
        );
    }

    std::fs::create_dir_all(&args.out)
        .map_err(|source| CliRunError::CreateOutDir { path: args.out.clone(), source })?;
    let mut store = LocalStore::new(&args.out);

    let commands = TemplateCommandBuilder::new(experiment.program);
    let output = TemplateOutputTemplate::new(experiment.output);
    let reporter: Box<dyn Reporter> = if args.quiet { Box::new(SilentReporter) } else { Box::new(ConsoleReporter) };

    let policy = if args.continue_on_failure { FailurePolicy::ContinueOnFailure } else { FailurePolicy::Propagate };
    let mut orchestrator = Orchestrator::new(&mut store).with_policy(policy);
    let (_outcomes, summary) = orchestrator.run(&contexts, &commands, &output, reporter.as_ref())?;

    if summary.failed > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::from(0))
    }
}

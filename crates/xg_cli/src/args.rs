//! Deterministic, offline CLI argument parsing & validation.
//!
//! Grounded on `vm_cli::args`'s shape (an explicit `CliError`, a
//! `parse_and_validate` entry point, local-path-only enforcement) but built
//! on clap's builder API rather than its derive macro: this crate's flags
//! are fixed (the option graph itself is data-driven from `--manifest`, not
//! from compile-time flags), so the builder API is used here only because
//! it is the natural surface for one more CLI that wants to stay close to
//! clap's idioms without pulling in the derive feature for a handful of
//! flags.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, Command};

#[derive(Debug)]
pub struct Args {
    pub manifest: PathBuf,
    pub out: PathBuf,
    pub continue_on_failure: bool,
    pub quiet: bool,
}

#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local (no scheme): {p}"),
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}

impl std::error::Error for CliError {}

fn build_command() -> Command {
    Command::new("xg")
        .about("Drive an option-dependency-hypergraph experiment end to end.")
        .arg(
            Arg::new("manifest")
                .long("manifest")
                .required(true)
                .value_name("PATH")
                .help("experiment-definition JSON file (options, constraints, candidates, program, output)"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .default_value(".")
                .value_name("DIR")
                .help("resource-store root directory"),
        )
        .arg(
            Arg::new("continue-on-failure")
                .long("continue-on-failure")
                .action(ArgAction::SetTrue)
                .help("keep driving remaining contexts after one fails, instead of stopping the run"),
        )
        .arg(Arg::new("quiet").long("quiet").action(ArgAction::SetTrue).help("suppress progress output"))
}

pub fn parse_and_validate() -> Result<Args, CliError> {
    let matches = build_command().get_matches();

    let manifest = PathBuf::from(matches.get_one::<String>("manifest").expect("required"));
    ensure_local_exists(&manifest, "--manifest")?;

    let out = PathBuf::from(matches.get_one::<String>("out").expect("has default"));

    Ok(Args {
        manifest: normalize_path(&manifest),
        out,
        continue_on_failure: matches.get_flag("continue-on-failure"),
        quiet: matches.get_flag("quiet"),
    })
}

fn has_scheme(s: &str) -> bool {
    s.contains("://") || s.starts_with("http:") || s.starts_with("https:")
}

fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    let s = p.to_string_lossy().to_string();
    if has_scheme(&s) {
        return Err(CliError::NonLocalPath(format!("{label} {s}")));
    }
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {s}")))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {s}")));
    }
    Ok(())
}

fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf())
}

//! The experiment-definition manifest loader (spec §2's "Configuration"
//! ambient concern): deserializes a JSON file describing an option
//! dependency graph, its candidate value lists, and the external program
//! contract, then feeds the same fluent builder (`xg_deps::graph::OptionGraph`)
//! a programmatic caller would use directly.
//!
//! Grounded on `vm_io::manifest` + `vm_pipeline::load`'s shape: a thin
//! deserialize step, a structural-validation pass, then handing the result
//! to the same construction path every other entry point uses.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use xg_core::errors::OptionError;
use xg_core::option::Belonging;
use xg_core::value::{OptionValue, ValueType};
use xg_deps::errors::DependencyError;
use xg_deps::graph::OptionGraph;
use xg_deps::predicate::Predicate;
use xg_enum::enumerator::CandidateValues;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read manifest {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("manifest {path} is not valid JSON: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("unknown value type {0:?}")]
    UnknownValueType(String),

    #[error("unknown belonging {0:?}")]
    UnknownBelonging(String),

    #[error("constraint references undeclared option {0:?}")]
    UnknownOption(String),

    #[error(transparent)]
    Option(#[from] OptionError),

    #[error(transparent)]
    Dependency(#[from] DependencyError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
struct ManifestOption {
    name: String,
    description: String,
    value_type: String,
    belonging: String,
    #[serde(default)]
    domain: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ManifestPredicate {
    Equals { name: String, value: String },
    InSet { name: String, values: Vec<String> },
    IsNull { name: String },
    IsNotNull { name: String },
    And { of: Vec<ManifestPredicate> },
    Or { of: Vec<ManifestPredicate> },
    Not { of: Box<ManifestPredicate> },
}

#[derive(Debug, Deserialize)]
struct ComboEntry {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ManifestConstraint {
    OptionValueNeedsOption { source: String, values: Vec<String>, target: String },
    OptionUsableOnlyWhen { source: String, target: String, predicate: ManifestPredicate },
    MultipleNeedsToHappen { names: Vec<String>, predicate: ManifestPredicate },
    MultipleCantHappen { names: Vec<String>, predicate: ManifestPredicate },
    ProhibitCombination { combo: Vec<ComboEntry> },
    EnsureCombination { combo: Vec<ComboEntry> },
    QuickWhichHasToHappen { names: Vec<String>, predicate: ManifestPredicate },
    QuickCannotToHappen { names: Vec<String>, predicate: ManifestPredicate },
}

#[derive(Debug, Default, Deserialize)]
struct ManifestCandidates {
    #[serde(default)]
    under_test: IndexMap<String, Vec<String>>,
    #[serde(default)]
    environment: IndexMap<String, Vec<String>>,
}

/// The external program contract (spec §6), rendered per test context via
/// `{option_name}` placeholders substituted by [`crate::command`].
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramSpec {
    pub path: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub cwd: Option<String>,
}

/// Where the orchestrator expects the external program's artifact, and what
/// to call it once archived (spec §3 "Artifact key").
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSpec {
    pub path: String,
    pub data_type: String,
    pub name_template: String,
    pub local_file_template: String,
}

#[derive(Debug, Deserialize)]
struct ExperimentManifest {
    options: Vec<ManifestOption>,
    #[serde(default)]
    constraints: Vec<ManifestConstraint>,
    #[serde(default)]
    candidates: ManifestCandidates,
    program: ProgramSpec,
    output: OutputSpec,
}

pub struct LoadedExperiment {
    pub graph: OptionGraph,
    pub candidates: CandidateValues,
    pub program: ProgramSpec,
    pub output: OutputSpec,
}

fn parse_value_type(raw: &str) -> ConfigResult<ValueType> {
    match raw {
        "Int" => Ok(ValueType::Int),
        "Float" => Ok(ValueType::Float),
        "Bool" => Ok(ValueType::Bool),
        "Str" => Ok(ValueType::Str),
        "IntList" => Ok(ValueType::IntList),
        "FloatList" => Ok(ValueType::FloatList),
        "BoolList" => Ok(ValueType::BoolList),
        "StrList" => Ok(ValueType::StrList),
        "PercentageInt" => Ok(ValueType::PercentageInt),
        "PercentageIntList" => Ok(ValueType::PercentageIntList),
        other => Err(ConfigError::UnknownValueType(other.to_string())),
    }
}

fn parse_belonging(raw: &str) -> ConfigResult<Belonging> {
    match raw {
        "Settings" => Ok(Belonging::Settings),
        "UnderTest" => Ok(Belonging::UnderTest),
        "Environment" => Ok(Belonging::Environment),
        other => Err(ConfigError::UnknownBelonging(other.to_string())),
    }
}

/// Parse one raw manifest token into a single [`OptionValue`] of `ty`,
/// reusing [`OptionValue::parse_scalar`]/[`OptionValue::parse_list`] — the
/// same conversion a CLI flag would go through — rather than hand-rolling a
/// second JSON-to-`OptionValue` mapping.
fn parse_one(name: &str, raw: &str, ty: ValueType) -> Result<OptionValue, OptionError> {
    if !ty.is_list() {
        return OptionValue::parse_scalar(name, raw, ty);
    }
    let elems = OptionValue::parse_list(name, raw, ty)?;
    Ok(match ty {
        ValueType::IntList => OptionValue::IntList(elems.into_iter().map(unwrap_int).collect()),
        ValueType::FloatList => OptionValue::FloatList(elems.into_iter().map(unwrap_float).collect()),
        ValueType::BoolList => OptionValue::BoolList(elems.into_iter().map(unwrap_bool).collect()),
        ValueType::StrList => OptionValue::StrList(elems.into_iter().map(unwrap_str).collect()),
        ValueType::PercentageIntList => OptionValue::PercentageIntList(elems.into_iter().map(unwrap_pct).collect()),
        _ => unreachable!("is_list() only admits the five *List variants"),
    })
}

fn unwrap_int(v: OptionValue) -> i64 {
    match v {
        OptionValue::Int(n) => n,
        _ => unreachable!("parse_list(ty=IntList) only ever yields Int"),
    }
}
fn unwrap_float(v: OptionValue) -> f64 {
    match v {
        OptionValue::Float(n) => n,
        _ => unreachable!("parse_list(ty=FloatList) only ever yields Float"),
    }
}
fn unwrap_bool(v: OptionValue) -> bool {
    match v {
        OptionValue::Bool(b) => b,
        _ => unreachable!("parse_list(ty=BoolList) only ever yields Bool"),
    }
}
fn unwrap_str(v: OptionValue) -> String {
    match v {
        OptionValue::Str(s) => s,
        _ => unreachable!("parse_list(ty=StrList) only ever yields Str"),
    }
}
fn unwrap_pct(v: OptionValue) -> u8 {
    match v {
        OptionValue::PercentageInt(p) => p,
        _ => unreachable!("parse_list(ty=PercentageIntList) only ever yields PercentageInt"),
    }
}

fn option_type(types: &IndexMap<String, ValueType>, name: &str) -> ConfigResult<ValueType> {
    types.get(name).copied().ok_or_else(|| ConfigError::UnknownOption(name.to_string()))
}

fn build_predicate(types: &IndexMap<String, ValueType>, p: &ManifestPredicate) -> ConfigResult<Predicate> {
    Ok(match p {
        ManifestPredicate::Equals { name, value } => {
            let ty = option_type(types, name)?;
            Predicate::ValueEquals(name.clone(), parse_one(name, value, ty)?)
        }
        ManifestPredicate::InSet { name, values } => {
            let ty = option_type(types, name)?;
            let values = values.iter().map(|raw| parse_one(name, raw, ty)).collect::<Result<_, _>>()?;
            Predicate::ValueInSet(name.clone(), values)
        }
        ManifestPredicate::IsNull { name } => Predicate::ValueIsNull(name.clone()),
        ManifestPredicate::IsNotNull { name } => Predicate::ValueIsNotNull(name.clone()),
        ManifestPredicate::And { of } => Predicate::And(of.iter().map(|p| build_predicate(types, p)).collect::<Result<_, _>>()?),
        ManifestPredicate::Or { of } => Predicate::Or(of.iter().map(|p| build_predicate(types, p)).collect::<Result<_, _>>()?),
        ManifestPredicate::Not { of } => Predicate::Not(Box::new(build_predicate(types, of)?)),
    })
}

fn resolve_combo(types: &IndexMap<String, ValueType>, combo: &[ComboEntry]) -> ConfigResult<Vec<(String, OptionValue)>> {
    combo
        .iter()
        .map(|entry| {
            let ty = option_type(types, &entry.name)?;
            Ok((entry.name.clone(), parse_one(&entry.name, &entry.value, ty)?))
        })
        .collect()
}

fn apply_constraint(graph: &mut OptionGraph, types: &IndexMap<String, ValueType>, c: &ManifestConstraint) -> ConfigResult<()> {
    match c {
        ManifestConstraint::OptionValueNeedsOption { source, values, target } => {
            let ty = option_type(types, source)?;
            let values = values.iter().map(|raw| parse_one(source, raw, ty)).collect::<Result<_, _>>()?;
            graph.constraint_option_value_needs_option(source.clone(), values, target.clone())?;
        }
        ManifestConstraint::OptionUsableOnlyWhen { source, target, predicate } => {
            let predicate = build_predicate(types, predicate)?;
            graph.constraint_option_usable_only_when(source.clone(), target.clone(), predicate)?;
        }
        ManifestConstraint::MultipleNeedsToHappen { names, predicate } => {
            let predicate = build_predicate(types, predicate)?;
            graph.constraint_multiple_needs_to_happen(names.clone(), predicate)?;
        }
        ManifestConstraint::MultipleCantHappen { names, predicate } => {
            let predicate = build_predicate(types, predicate)?;
            graph.constraint_multiple_cant_happen(names.clone(), predicate)?;
        }
        ManifestConstraint::ProhibitCombination { combo } => {
            graph.constraint_prohibit_combination(resolve_combo(types, combo)?)?;
        }
        ManifestConstraint::EnsureCombination { combo } => {
            graph.constraint_ensure_combination(resolve_combo(types, combo)?)?;
        }
        ManifestConstraint::QuickWhichHasToHappen { names, predicate } => {
            let predicate = build_predicate(types, predicate)?;
            graph.constraint_quick_which_has_to_happen(names.clone(), predicate)?;
        }
        ManifestConstraint::QuickCannotToHappen { names, predicate } => {
            let predicate = build_predicate(types, predicate)?;
            graph.constraint_quick_cannot_to_happen(names.clone(), predicate)?;
        }
    }
    Ok(())
}

/// SETTINGS options take exactly one value per run (spec §3) and are not
/// enumerated by `xg_enum` (candidate lists are a `UNDER_TEST`/`ENVIRONMENT`
/// concept); a manifest may still declare them, purely so constraints and
/// the command/output templates can reference them, but no candidate list is
/// built for them here.
fn build_candidates(manifest: &ExperimentManifest, types: &IndexMap<String, ValueType>) -> ConfigResult<CandidateValues> {
    let mut candidates = CandidateValues::new();
    for (name, raws) in &manifest.candidates.under_test {
        let ty = option_type(types, name)?;
        let values = raws.iter().map(|raw| parse_one(name, raw, ty)).collect::<Result<_, _>>()?;
        candidates = candidates.with_under_test(name.clone(), values);
    }
    for (name, raws) in &manifest.candidates.environment {
        let ty = option_type(types, name)?;
        let values = raws.iter().map(|raw| parse_one(name, raw, ty)).collect::<Result<_, _>>()?;
        candidates = candidates.with_environment(name.clone(), values);
    }
    Ok(candidates)
}

pub fn load_experiment(path: &Path) -> ConfigResult<LoadedExperiment> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    let manifest: ExperimentManifest =
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;

    let mut graph = OptionGraph::new();
    let mut types: IndexMap<String, ValueType> = IndexMap::new();

    for opt in &manifest.options {
        let ty = parse_value_type(&opt.value_type)?;
        let belonging = parse_belonging(&opt.belonging)?;
        match (&opt.domain, ty.is_list()) {
            (Some(domain_raw), _) => {
                let domain = domain_raw.iter().map(|raw| parse_one(&opt.name, raw, ty)).collect::<Result<Vec<_>, _>>()?;
                graph.add_choice(opt.name.clone(), opt.description.clone(), belonging, domain)?;
            }
            (None, true) => graph.add_multivalue(opt.name.clone(), opt.description.clone(), belonging, ty)?,
            (None, false) if ty == ValueType::Bool => graph.add_flag(opt.name.clone(), opt.description.clone(), belonging)?,
            (None, false) => graph.add_value(opt.name.clone(), opt.description.clone(), belonging, ty)?,
        }
        types.insert(opt.name.clone(), ty);
    }

    for constraint in &manifest.constraints {
        apply_constraint(&mut graph, &types, constraint)?;
    }

    let candidates = build_candidates(&manifest, &types)?;

    Ok(LoadedExperiment { graph, candidates, program: manifest.program, output: manifest.output })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_manifest(json: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_a_minimal_manifest() {
        let json = r#"{
            "options": [
                {"name": "label", "description": "context label", "value_type": "Str", "belonging": "UnderTest"}
            ],
            "candidates": {"under_test": {"label": ["a", "b"]}},
            "program": {"path": "sh", "args": ["-c", "echo {label} > {label}.csv"]},
            "output": {"path": "results", "data_type": "csv", "name_template": "{label}", "local_file_template": "{label}.csv"}
        }"#;
        let f = write_manifest(json);
        let experiment = load_experiment(f.path()).unwrap();
        assert_eq!(experiment.candidates.under_test.get("label").unwrap().len(), 2);
        assert_eq!(experiment.program.path, "sh");
    }

    #[test]
    fn rejects_a_constraint_targeting_an_undeclared_option() {
        let json = r#"{
            "options": [
                {"name": "label", "description": "context label", "value_type": "Str", "belonging": "UnderTest"}
            ],
            "constraints": [
                {"kind": "option_usable_only_when", "source": "label", "target": "ghost", "predicate": {"op": "is_not_null", "name": "ghost"}}
            ],
            "candidates": {"under_test": {"label": ["a"]}},
            "program": {"path": "sh", "args": []},
            "output": {"path": "results", "data_type": "csv", "name_template": "{label}", "local_file_template": "{label}.csv"}
        }"#;
        let f = write_manifest(json);
        assert!(matches!(load_experiment(f.path()), Err(ConfigError::Dependency(_))));
    }

    #[test]
    fn rejects_a_predicate_over_an_undeclared_option() {
        let json = r#"{
            "options": [
                {"name": "label", "description": "context label", "value_type": "Str", "belonging": "UnderTest"},
                {"name": "target", "description": "", "value_type": "Bool", "belonging": "UnderTest"}
            ],
            "constraints": [
                {"kind": "option_usable_only_when", "source": "label", "target": "target", "predicate": {"op": "equals", "name": "ghost", "value": "1"}}
            ],
            "candidates": {"under_test": {"label": ["a"], "target": ["true"]}},
            "program": {"path": "sh", "args": []},
            "output": {"path": "results", "data_type": "csv", "name_template": "{label}", "local_file_template": "{label}.csv"}
        }"#;
        let f = write_manifest(json);
        assert!(matches!(load_experiment(f.path()), Err(ConfigError::UnknownOption(_))));
    }

    #[test]
    fn rejects_an_unknown_value_type() {
        let json = r#"{
            "options": [
                {"name": "label", "description": "", "value_type": "Nonsense", "belonging": "UnderTest"}
            ],
            "program": {"path": "sh", "args": []},
            "output": {"path": "results", "data_type": "csv", "name_template": "x", "local_file_template": "x.csv"}
        }"#;
        let f = write_manifest(json);
        assert!(matches!(load_experiment(f.path()), Err(ConfigError::UnknownValueType(_))));
    }

    #[test]
    fn resolves_a_domain_restricted_choice_option() {
        let json = r#"{
            "options": [
                {"name": "mode", "description": "", "value_type": "Str", "belonging": "UnderTest", "domain": ["fast", "slow"]}
            ],
            "candidates": {"under_test": {"mode": ["fast", "slow"]}},
            "program": {"path": "sh", "args": []},
            "output": {"path": "results", "data_type": "csv", "name_template": "{mode}", "local_file_template": "{mode}.csv"}
        }"#;
        let f = write_manifest(json);
        let experiment = load_experiment(f.path()).unwrap();
        let def = experiment.graph.option_def("mode").unwrap();
        assert_eq!(def.domain.as_ref().unwrap().len(), 2);
    }
}

//! Translates a test context into an external-program invocation and an
//! archived-artifact location, via the `{option_name}`-templated strings the
//! manifest declares (spec §6: this translation is explicitly out of
//! `xg_orch`'s scope, left to the caller who knows the program under study).
//!
//! Grounded on `xg_orch::invocation::FixedProgram` / `output::SingleFileTemplate`'s
//! closure-based shape, generalized here to string templates so the mapping
//! can come from the manifest file instead of being wired in Rust.

use std::path::{Path, PathBuf};

use xg_core::bundle::TestContext;
use xg_orch::invocation::{CommandBuilder, ExternalInvocation};
use xg_orch::output::OutputTemplate;
use xg_store::key::ArtifactKey;

use crate::config::{OutputSpec, ProgramSpec};

/// Substitute every `{option_name}` placeholder in `template` with that
/// option's current value in `tc`. Returns `None` if any referenced option
/// is null or undeclared — the whole templated string (a command-line
/// argument, a filename) is then dropped rather than emitted with a blank
/// hole in it.
fn render_template(template: &str, tc: &TestContext) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        match rest.find('{') {
            None => {
                out.push_str(rest);
                return Some(out);
            }
            Some(start) => {
                out.push_str(&rest[..start]);
                let after = &rest[start + 1..];
                let end = after.find('}')?;
                let name = &after[..end];
                let value = tc.get_option(name).ok().flatten()?;
                out.push_str(&value.to_string());
                rest = &after[end + 1..];
            }
        }
    }
}

pub struct TemplateCommandBuilder {
    program: String,
    args_template: Vec<String>,
    cwd: PathBuf,
}

impl TemplateCommandBuilder {
    pub fn new(spec: ProgramSpec) -> Self {
        let cwd = spec.cwd.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
        Self { program: spec.path, args_template: spec.args, cwd }
    }
}

impl CommandBuilder for TemplateCommandBuilder {
    fn build(&self, tc: &TestContext) -> ExternalInvocation {
        let args = self.args_template.iter().filter_map(|t| render_template(t, tc)).collect();
        ExternalInvocation::new(self.program.clone(), args, self.cwd.clone())
    }
}

pub struct TemplateOutputTemplate {
    path: String,
    data_type: String,
    name_template: String,
    local_file_template: String,
}

impl TemplateOutputTemplate {
    pub fn new(spec: OutputSpec) -> Self {
        Self {
            path: spec.path,
            data_type: spec.data_type,
            name_template: spec.name_template,
            local_file_template: spec.local_file_template,
        }
    }
}

impl OutputTemplate for TemplateOutputTemplate {
    fn artifact_key(&self, tc: &TestContext) -> ArtifactKey {
        let name = render_template(&self.name_template, tc).unwrap_or_default();
        ArtifactKey::new(self.path.clone(), name, self.data_type.clone())
    }

    fn local_path(&self, tc: &TestContext, cwd: &Path) -> PathBuf {
        let file = render_template(&self.local_file_template, tc).unwrap_or_default();
        cwd.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xg_core::bundle::{BundleKind, OptionBundle, TestContext};
    use xg_core::value::OptionValue;

    fn context(label: &str) -> TestContext {
        let mut under_test = OptionBundle::new(BundleKind::StuffUnderTest, ["label".to_string()]);
        under_test.set_option("label", Some(OptionValue::Str(label.to_string()))).unwrap();
        let environment = OptionBundle::new(BundleKind::Environment, Vec::<String>::new());
        TestContext::new(under_test, environment)
    }

    #[test]
    fn substitutes_every_placeholder() {
        let tc = context("alpha");
        assert_eq!(render_template("{label}.csv", &tc).unwrap(), "alpha.csv");
        assert_eq!(render_template("run-{label}-{label}", &tc).unwrap(), "run-alpha-alpha");
    }

    #[test]
    fn drops_a_template_whose_option_is_null_or_unknown() {
        let tc = context("alpha");
        assert_eq!(render_template("{missing}.csv", &tc), None);
    }

    #[test]
    fn template_with_no_placeholder_passes_through() {
        let tc = context("alpha");
        assert_eq!(render_template("fixed.csv", &tc).unwrap(), "fixed.csv");
    }
}

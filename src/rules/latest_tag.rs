use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::resolve::substitute_args;

/// DL3007: do not use the implicit moving `latest` tag
pub struct LatestTag;

impl Rule for LatestTag {
    fn id(&self) -> &'static str {
        "DL3007"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "Using latest is prone to errors if the image will ever update. Pin the version explicitly to a release tag"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let defaults = context.dockerfile.arg_defaults();
        let mut violations = Vec::new();

        for stage in &context.dockerfile.stages {
            if let Some(tag) = &stage.from.tag {
                if substitute_args(tag, &defaults) == "latest" {
                    violations.push(Violation::new(
                        self.id(),
                        self.severity(),
                        self.description(),
                        stage.line,
                    ));
                }
            }
        }

        violations
    }
}

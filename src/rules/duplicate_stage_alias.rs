use crate::linter::{Rule, RuleContext, Severity, Violation};
use std::collections::HashSet;

/// DL3024: stage aliases must be unique
pub struct DuplicateStageAlias;

impl Rule for DuplicateStageAlias {
    fn id(&self) -> &'static str {
        "DL3024"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "FROM aliases (stage names) must be unique"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for stage in &context.dockerfile.stages {
            // Aliases compare case-insensitively; Stage::alias lowercases.
            if let Some(alias) = stage.alias() {
                if !seen.insert(alias) {
                    violations.push(Violation::new(
                        self.id(),
                        self.severity(),
                        "FROM aliases (stage names) must be unique",
                        stage.line,
                    ));
                }
            }
        }

        violations
    }
}

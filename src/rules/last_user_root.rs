use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::parser::ast::InstructionKind;

/// DL3002: the user a stage ends with should not be root
pub struct LastUserRoot;

impl Rule for LastUserRoot {
    fn id(&self) -> &'static str {
        "DL3002"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "Last USER should not be root"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for stage in &context.dockerfile.stages {
            let last_user = stage
                .instructions
                .iter()
                .filter_map(|instruction| match &instruction.kind {
                    InstructionKind::User { user } => Some((instruction.line, user)),
                    _ => None,
                })
                .last();

            if let Some((line, user)) = last_user {
                // USER may carry a group suffix (`root:root`).
                let name = user.split(':').next().unwrap_or(user);
                if name == "root" || name == "0" {
                    violations.push(Violation::new(
                        self.id(),
                        self.severity(),
                        "Last USER should not be root",
                        line,
                    ));
                }
            }
        }

        violations
    }
}

use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::parser::ast::InstructionKind;

/// DL3043: ONBUILD must not trigger ONBUILD, FROM, or MAINTAINER
pub struct OnbuildForbidden;

impl Rule for OnbuildForbidden {
    fn id(&self) -> &'static str {
        "DL3043"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "ONBUILD, FROM or MAINTAINER triggered from within ONBUILD instruction"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for instruction in context.dockerfile.instructions() {
            if let InstructionKind::Onbuild(nested) = &instruction.kind {
                if matches!(nested.keyword.as_str(), "ONBUILD" | "FROM" | "MAINTAINER") {
                    violations.push(Violation::new(
                        self.id(),
                        self.severity(),
                        "ONBUILD, FROM or MAINTAINER triggered from within ONBUILD instruction",
                        instruction.line,
                    ));
                }
            }
        }

        violations
    }
}

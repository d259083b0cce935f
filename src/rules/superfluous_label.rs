use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::parser::ast::InstructionKind;

/// DL3050: labels outside the configured allowed set
pub struct SuperfluousLabel;

impl Rule for SuperfluousLabel {
    fn id(&self) -> &'static str {
        "DL3050"
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn description(&self) -> &'static str {
        "Superfluous label present"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let allowed = &context.config.allowed_labels;
        if allowed.is_empty() {
            return Vec::new();
        }

        let is_allowed = |key: &str| {
            // Required labels are allowed implicitly.
            allowed.iter().any(|label| label == key)
                || context.config.required_labels.iter().any(|label| label == key)
        };

        let mut violations = Vec::new();
        for instruction in context.dockerfile.instructions() {
            if let InstructionKind::Label { pairs } = &instruction.kind {
                for (key, _) in pairs {
                    if !is_allowed(key) {
                        violations.push(Violation::new(
                            self.id(),
                            self.severity(),
                            &format!("Superfluous label `{}` present", key),
                            instruction.line,
                        ));
                    }
                }
            }
        }

        violations
    }
}

use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::parser::ast::InstructionKind;
use std::collections::HashSet;

/// DL3049: labels required by configuration must be present
pub struct MissingRequiredLabel;

impl Rule for MissingRequiredLabel {
    fn id(&self) -> &'static str {
        "DL3049"
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn description(&self) -> &'static str {
        "Required label is missing"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let required = &context.config.required_labels;
        if required.is_empty() {
            return Vec::new();
        }

        let dockerfile = context.dockerfile;
        let declared: HashSet<&str> = dockerfile
            .instructions()
            .filter_map(|instruction| match &instruction.kind {
                InstructionKind::Label { pairs } => Some(pairs),
                _ => None,
            })
            .flatten()
            .map(|(key, _)| key.as_str())
            .collect();

        // Missing labels have no natural source line; report them against the
        // final stage's FROM.
        let line = dockerfile.stages.last().map(|s| s.line).unwrap_or(1);

        required
            .iter()
            .filter(|label| !declared.contains(label.as_str()))
            .map(|label| {
                Violation::new(
                    self.id(),
                    self.severity(),
                    &format!("Label `{}` is missing", label),
                    line,
                )
            })
            .collect()
    }
}

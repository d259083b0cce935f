use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::parser::ast::InstructionKind;

/// DL3025: CMD and ENTRYPOINT should use the JSON exec form
pub struct JsonNotationCmdEntrypoint;

impl Rule for JsonNotationCmdEntrypoint {
    fn id(&self) -> &'static str {
        "DL3025"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "Use arguments JSON notation for CMD and ENTRYPOINT arguments"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for instruction in context.dockerfile.instructions() {
            let args = match &instruction.kind {
                InstructionKind::Cmd(args) | InstructionKind::Entrypoint(args) => args,
                _ => continue,
            };
            if args.exec.is_none() && !args.command.trim().is_empty() {
                violations.push(Violation::new(
                    self.id(),
                    self.severity(),
                    "Use arguments JSON notation for CMD and ENTRYPOINT arguments",
                    instruction.line,
                ));
            }
        }

        violations
    }
}

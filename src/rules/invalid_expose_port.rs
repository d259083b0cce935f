use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::parser::ast::InstructionKind;

/// DL3011: EXPOSE ports must be within the UNIX port range
pub struct InvalidExposePort;

impl Rule for InvalidExposePort {
    fn id(&self) -> &'static str {
        "DL3011"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "Valid UNIX ports range from 0 to 65535"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for instruction in context.dockerfile.instructions() {
            if let InstructionKind::Expose { ports } = &instruction.kind {
                for spec in ports {
                    if spec.port.contains('$') {
                        continue;
                    }
                    // A spec may be a single port or a `low-high` range.
                    let out_of_range = spec
                        .port
                        .split('-')
                        .filter_map(|part| part.parse::<u64>().ok())
                        .any(|port| port > 65535);
                    if out_of_range {
                        violations.push(Violation::new(
                            self.id(),
                            self.severity(),
                            "Valid UNIX ports range from 0 to 65535",
                            instruction.line,
                        ));
                    }
                }
            }
        }

        violations
    }
}

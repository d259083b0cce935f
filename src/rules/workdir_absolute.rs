use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::parser::ast::InstructionKind;

/// DL3000: WORKDIR must use an absolute path
pub struct WorkdirAbsolute;

impl Rule for WorkdirAbsolute {
    fn id(&self) -> &'static str {
        "DL3000"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "Use absolute WORKDIR"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for instruction in context.dockerfile.instructions() {
            if let InstructionKind::Workdir { path } = &instruction.kind {
                if is_relative(path) {
                    violations.push(Violation::new(
                        self.id(),
                        self.severity(),
                        "Use absolute WORKDIR",
                        instruction.line,
                    ));
                }
            }
        }

        violations
    }
}

/// A path with variables is not judged; its value is unknown at lint time.
fn is_relative(path: &str) -> bool {
    if path.is_empty() || path.contains('$') || path.starts_with('/') {
        return false;
    }
    // Windows drive letter counts as absolute.
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return false;
    }
    true
}

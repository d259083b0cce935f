use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::parser::ast::InstructionKind;

/// DL3003: use WORKDIR instead of `cd` in RUN
pub struct RunCdUsage;

impl Rule for RunCdUsage {
    fn id(&self) -> &'static str {
        "DL3003"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "Use WORKDIR to switch to a directory"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for instruction in context.dockerfile.instructions() {
            if let InstructionKind::Run { command } = &instruction.kind {
                let visible = strip_subshells(command);
                let uses_cd = shell_segments(&visible).iter().any(|segment| {
                    segment.split_whitespace().next() == Some("cd")
                });
                if uses_cd {
                    violations.push(Violation::new(
                        self.id(),
                        self.severity(),
                        "Use WORKDIR to switch to a directory",
                        instruction.line,
                    ));
                }
            }
        }

        violations
    }
}

/// Drop `$( ... )` spans. A `cd` inside a subshell does not change the working
/// directory of the build step.
fn strip_subshells(command: &str) -> String {
    let mut out = String::with_capacity(command.len());
    let mut depth = 0usize;
    let mut chars = command.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'(') {
            chars.next();
            depth += 1;
            continue;
        }
        if depth > 0 {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            continue;
        }
        out.push(c);
    }

    out
}

/// Split on command separators. `||` and `&&` degrade to empty segments under
/// the single-character split, which is harmless here.
fn shell_segments(command: &str) -> Vec<&str> {
    command
        .split(['\n', ';', '|', '&'])
        .map(str::trim)
        .collect()
}

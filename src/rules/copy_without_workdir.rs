use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::parser::ast::{InstructionKind, Stage};
use crate::resolve::stage_or_ancestor;

/// DL3045: COPY to a relative destination needs a WORKDIR
pub struct CopyWithoutWorkdir;

impl Rule for CopyWithoutWorkdir {
    fn id(&self) -> &'static str {
        "DL3045"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "COPY to a relative destination without WORKDIR set"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let dockerfile = context.dockerfile;
        let mut violations = Vec::new();

        for stage in &dockerfile.stages {
            // A WORKDIR set in this stage or inherited from a parent stage
            // anchors relative destinations.
            let has_workdir = stage_or_ancestor(dockerfile, stage, sets_workdir);
            if has_workdir {
                continue;
            }

            for instruction in &stage.instructions {
                if let InstructionKind::Copy(args) = &instruction.kind {
                    if is_relative(&args.dest) {
                        violations.push(Violation::new(
                            self.id(),
                            self.severity(),
                            "COPY to a relative destination without WORKDIR set",
                            instruction.line,
                        ));
                    }
                }
            }
        }

        violations
    }
}

fn sets_workdir(stage: &Stage) -> bool {
    stage
        .instructions
        .iter()
        .any(|instruction| matches!(instruction.kind, InstructionKind::Workdir { .. }))
}

fn is_relative(dest: &str) -> bool {
    if dest.is_empty() || dest.contains('$') || dest.starts_with('/') {
        return false;
    }
    let bytes = dest.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return false;
    }
    true
}

use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::parser::ast::InstructionKind;

/// DL3020: use COPY instead of ADD for plain files and folders
pub struct CopyOverAdd;

const ARCHIVE_SUFFIXES: [&str; 9] = [
    ".tar", ".tar.gz", ".tgz", ".tar.bz2", ".tbz2", ".tar.xz", ".txz", ".gz", ".xz",
];

impl Rule for CopyOverAdd {
    fn id(&self) -> &'static str {
        "DL3020"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "Use COPY instead of ADD for files and folders"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for instruction in context.dockerfile.instructions() {
            if let InstructionKind::Add(args) = &instruction.kind {
                // ADD stays legitimate for remote fetches and auto-extracted
                // archives; anything else belongs to COPY.
                let all_exempt =
                    !args.sources.is_empty() && args.sources.iter().all(|s| is_exempt(s));
                if !all_exempt {
                    violations.push(Violation::new(
                        self.id(),
                        self.severity(),
                        "Use COPY instead of ADD for files and folders",
                        instruction.line,
                    ));
                }
            }
        }

        violations
    }
}

fn is_exempt(source: &str) -> bool {
    let lower = source.to_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || ARCHIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

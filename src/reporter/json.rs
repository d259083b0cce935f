use crate::linter::{Severity, Violation};
use std::path::Path;

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    file: String,
    violations: &'a [Violation],
    summary: Summary,
}

#[derive(serde::Serialize)]
struct Summary {
    errors: usize,
    warnings: usize,
    infos: usize,
    styles: usize,
}

pub(crate) fn report(violations: &[Violation], path: &Path) {
    println!("{}", format(violations, path));
}

pub(crate) fn format(violations: &[Violation], path: &Path) -> String {
    let count = |severity: Severity| violations.iter().filter(|v| v.severity == severity).count();

    let report = JsonReport {
        file: path.display().to_string(),
        violations,
        summary: Summary {
            errors: count(Severity::Error),
            warnings: count(Severity::Warning),
            infos: count(Severity::Info),
            styles: count(Severity::Style),
        },
    };

    serde_json::to_string_pretty(&report).unwrap()
}

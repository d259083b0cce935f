use crate::linter::{Severity, Violation};
use colored::{ColoredString, Colorize};
use std::path::Path;

pub(crate) fn report(violations: &[Violation], path: &Path) {
    let path_str = path.display();

    for violation in violations {
        let location = match violation.column {
            Some(column) => format!("{}:{}:{}", path_str, violation.line, column),
            None => format!("{}:{}", path_str, violation.line),
        };

        let severity_str = colorize(
            &format!("{}[{}]", severity_label(violation.severity), violation.rule),
            violation.severity,
        )
        .bold();

        println!("{}: {}: {}", location, severity_str, violation.message);
    }

    if !violations.is_empty() {
        println!();

        let count =
            |severity: Severity| violations.iter().filter(|v| v.severity == severity).count();
        let mut parts = Vec::new();
        for (severity, label) in [
            (Severity::Error, "error(s)"),
            (Severity::Warning, "warning(s)"),
            (Severity::Info, "info note(s)"),
            (Severity::Style, "style note(s)"),
        ] {
            let n = count(severity);
            if n > 0 {
                parts.push(format!("{} {}", n, label));
            }
        }
        println!("Found {}", parts.join(", "));
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
        Severity::Style => "style",
    }
}

fn colorize(s: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => s.red(),
        Severity::Warning => s.yellow(),
        Severity::Info => s.cyan(),
        Severity::Style => s.blue(),
    }
}

#[cfg(test)]
fn format_line(violation: &Violation, path: &Path) -> String {
    let path_str = path.display();
    let location = match violation.column {
        Some(column) => format!("{}:{}:{}", path_str, violation.line, column),
        None => format!("{}:{}", path_str, violation.line),
    };
    format!(
        "{}: {}[{}]: {}",
        location,
        severity_label(violation.severity),
        violation.rule,
        violation.message
    )
}

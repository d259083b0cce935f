use crate::config::LintConfig;
use crate::parser::ast::Dockerfile;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Style,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
            Severity::Style => write!(f, "STYLE"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub rule: String,
    pub severity: Severity,
    pub message: String,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl Violation {
    pub fn new(rule: &str, severity: Severity, message: &str, line: usize) -> Self {
        Self {
            rule: rule.to_string(),
            severity,
            message: message.to_string(),
            line,
            column: None,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

/// Everything a rule may inspect for one file.
pub struct RuleContext<'a> {
    pub dockerfile: &'a Dockerfile,
    pub config: &'a LintConfig,
    pub path: &'a Path,
}

pub trait Rule: Send + Sync {
    /// Stable rule id (`DL3006`, ...).
    fn id(&self) -> &'static str;
    /// Default severity; config may override per rule id.
    fn severity(&self) -> Severity;
    fn description(&self) -> &'static str;
    fn check(&self, context: &RuleContext) -> Vec<Violation>;
}

pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
}

impl Linter {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_default_rules() -> Self {
        let mut linter = Self::new();
        for rule in crate::rules::default_rules() {
            linter.add_rule(rule);
        }
        linter
    }

    pub fn add_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Get a reference to all rules
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Run every registered rule against one parsed Dockerfile.
    ///
    /// Rules disabled in the config are skipped entirely. Each rule's
    /// violations then pass through inline-ignore filtering and severity
    /// overrides, and the combined result is sorted by line, then rule id.
    /// The sort is stable, so the outcome does not depend on registration
    /// order. A panicking rule aborts the run; panics are not swallowed.
    pub fn lint(&self, dockerfile: &Dockerfile, config: &LintConfig, path: &Path) -> Vec<Violation> {
        let context = RuleContext {
            dockerfile,
            config,
            path,
        };

        let mut violations: Vec<Violation> = Vec::new();
        for rule in &self.rules {
            if config.is_ignored(rule.id()) {
                continue;
            }
            for mut violation in rule.check(&context) {
                if dockerfile.is_ignored(&violation.rule, violation.line) {
                    continue;
                }
                if let Some(severity) = config.severity_override(&violation.rule) {
                    violation.severity = severity;
                }
                violations.push(violation);
            }
        }

        violations.sort_by(|a, b| (a.line, a.rule.as_str()).cmp(&(b.line, b.rule.as_str())));
        violations
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_string;

    struct FixedRule {
        id: &'static str,
        lines: &'static [usize],
    }

    impl Rule for FixedRule {
        fn id(&self) -> &'static str {
            self.id
        }
        fn severity(&self) -> Severity {
            Severity::Warning
        }
        fn description(&self) -> &'static str {
            "test rule"
        }
        fn check(&self, _context: &RuleContext) -> Vec<Violation> {
            self.lines
                .iter()
                .map(|&line| Violation::new(self.id, self.severity(), "reported", line))
                .collect()
        }
    }

    fn lint_with_rules(rules: Vec<Box<dyn Rule>>, source: &str, config: &LintConfig) -> Vec<Violation> {
        let mut linter = Linter::new();
        for rule in rules {
            linter.add_rule(rule);
        }
        linter.lint(&parse_string(source), config, Path::new("Dockerfile"))
    }

    #[test]
    fn test_sorted_by_line_then_rule_id() {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(FixedRule {
                id: "DL9002",
                lines: &[3, 1],
            }),
            Box::new(FixedRule {
                id: "DL9001",
                lines: &[3],
            }),
        ];
        let violations = lint_with_rules(rules, "FROM ubuntu\n", &LintConfig::default());

        let keys: Vec<(usize, &str)> = violations
            .iter()
            .map(|v| (v.line, v.rule.as_str()))
            .collect();
        assert_eq!(keys, vec![(1, "DL9002"), (3, "DL9001"), (3, "DL9002")]);
    }

    #[test]
    fn test_order_independent_of_registration() {
        let forward: Vec<Box<dyn Rule>> = vec![
            Box::new(FixedRule {
                id: "DL9001",
                lines: &[2],
            }),
            Box::new(FixedRule {
                id: "DL9002",
                lines: &[2],
            }),
        ];
        let reversed: Vec<Box<dyn Rule>> = vec![
            Box::new(FixedRule {
                id: "DL9002",
                lines: &[2],
            }),
            Box::new(FixedRule {
                id: "DL9001",
                lines: &[2],
            }),
        ];

        let config = LintConfig::default();
        let a: Vec<String> = lint_with_rules(forward, "FROM ubuntu\n", &config)
            .into_iter()
            .map(|v| v.rule)
            .collect();
        let b: Vec<String> = lint_with_rules(reversed, "FROM ubuntu\n", &config)
            .into_iter()
            .map(|v| v.rule)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_ignored_rule_is_skipped() {
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(FixedRule {
            id: "DL9001",
            lines: &[1],
        })];
        let config: LintConfig = toml::from_str("ignored = [\"DL9001\"]").unwrap();

        assert!(lint_with_rules(rules, "FROM ubuntu\n", &config).is_empty());
    }

    #[test]
    fn test_inline_ignore_filters_matching_line_only() {
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(FixedRule {
            id: "DL9001",
            lines: &[2, 3],
        })];
        let source = "# dockerfile-lint ignore=DL9001\nFROM ubuntu\nRUN true\n";

        let violations = lint_with_rules(rules, source, &LintConfig::default());
        let lines: Vec<usize> = violations.iter().map(|v| v.line).collect();
        assert_eq!(lines, vec![3]);
    }

    #[test]
    fn test_severity_override_applies() {
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(FixedRule {
            id: "DL9001",
            lines: &[1],
        })];
        let config: LintConfig = toml::from_str("[severity]\nDL9001 = \"style\"").unwrap();

        let violations = lint_with_rules(rules, "FROM ubuntu\n", &config);
        assert_eq!(violations[0].severity, Severity::Style);
    }
}

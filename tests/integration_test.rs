use dockerfile_lint::{lint_source, parse_file, LintConfig, Linter, Severity, Violation};
use std::path::{Path, PathBuf};

fn fixtures_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .join("Dockerfile")
}

fn lint_fixture(name: &str) -> Vec<Violation> {
    lint_fixture_with(name, &LintConfig::default())
}

fn lint_fixture_with(name: &str, config: &LintConfig) -> Vec<Violation> {
    let path = fixtures_path(name);
    let dockerfile = parse_file(&path).expect("Failed to read fixture");
    Linter::with_default_rules().lint(&dockerfile, config, &path)
}

#[test]
fn test_valid_dockerfile_is_clean() {
    let violations = lint_fixture("valid");
    assert!(violations.is_empty(), "Expected no violations, got: {:?}", violations);
}

#[test]
fn test_warnings_dockerfile_reports_expected_rules() {
    let violations = lint_fixture("warnings");

    let found: Vec<(usize, &str)> = violations
        .iter()
        .map(|v| (v.line, v.rule.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            (1, "DL3006"),
            (2, "DL4000"),
            (3, "DL3020"),
            (4, "DL3003"),
            (5, "DL3025"),
        ]
    );

    let maintainer = violations.iter().find(|v| v.rule == "DL4000").unwrap();
    assert_eq!(maintainer.severity, Severity::Error);
    let untagged = violations.iter().find(|v| v.rule == "DL3006").unwrap();
    assert_eq!(untagged.severity, Severity::Warning);
}

#[test]
fn test_inline_ignore_suppresses_only_the_next_line() {
    let violations = lint_fixture("ignore");

    let untagged: Vec<usize> = violations
        .iter()
        .filter(|v| v.rule == "DL3006")
        .map(|v| v.line)
        .collect();
    // The directive covers the FROM on line 2; line 3 still reports.
    assert_eq!(untagged, vec![3]);
}

#[test]
fn test_multi_stage_with_platform_alias_is_clean() {
    let violations = lint_fixture("multi_stage");
    assert!(violations.is_empty(), "Expected no violations, got: {:?}", violations);
}

#[test]
fn test_from_cycle_is_handled_in_bounded_time() {
    let violations = lint_fixture("cycle");

    // Stage references across the cycle resolve as internal, so no DL3006,
    // but the unresolvable WORKDIR walk means the relative COPY reports.
    assert!(violations.iter().all(|v| v.rule != "DL3006"));
    let copy: Vec<usize> = violations
        .iter()
        .filter(|v| v.rule == "DL3045")
        .map(|v| v.line)
        .collect();
    assert_eq!(copy, vec![2]);
}

#[test]
fn test_violations_are_sorted_by_line_then_rule() {
    let violations = lint_fixture("warnings");

    let mut sorted = violations.clone();
    sorted.sort_by(|a, b| (a.line, a.rule.as_str()).cmp(&(b.line, b.rule.as_str())));
    let keys = |vs: &[Violation]| -> Vec<(usize, String)> {
        vs.iter().map(|v| (v.line, v.rule.clone())).collect()
    };
    assert_eq!(keys(&violations), keys(&sorted));
}

#[test]
fn test_config_ignored_rules_are_skipped() {
    let config = LintConfig {
        ignored: vec!["DL3006".to_string(), "DL3025".to_string()],
        ..LintConfig::default()
    };
    let violations = lint_fixture_with("warnings", &config);

    let rules: Vec<&str> = violations.iter().map(|v| v.rule.as_str()).collect();
    assert_eq!(rules, vec!["DL4000", "DL3020", "DL3003"]);
}

#[test]
fn test_config_severity_override() {
    let config = LintConfig {
        severity: [("DL3006".to_string(), Severity::Error)].into_iter().collect(),
        ..LintConfig::default()
    };
    let violations = lint_fixture_with("warnings", &config);

    let untagged = violations.iter().find(|v| v.rule == "DL3006").unwrap();
    assert_eq!(untagged.severity, Severity::Error);
}

#[test]
fn test_trusted_registries_across_stages() {
    let source = "FROM docker.io/library/golang:1.22 AS build\nFROM ghcr.io/acme/runtime:1\nCOPY --from=build /out /out";
    let config = LintConfig {
        trusted_registries: vec!["docker.io".to_string()],
        ..LintConfig::default()
    };
    let violations = lint_source(source, &config, Path::new("Dockerfile"));

    let registry: Vec<usize> = violations
        .iter()
        .filter(|v| v.rule == "DL3026")
        .map(|v| v.line)
        .collect();
    assert_eq!(registry, vec![2]);
}

#[test]
fn test_required_and_allowed_labels() {
    let source = "FROM ubuntu:22.04\nLABEL version=1.0 codename=zebra\n";
    let config = LintConfig {
        required_labels: vec!["maintainer".to_string()],
        allowed_labels: vec!["version".to_string()],
        ..LintConfig::default()
    };
    let violations = lint_source(source, &config, Path::new("Dockerfile"));

    let rules: Vec<&str> = violations.iter().map(|v| v.rule.as_str()).collect();
    assert_eq!(rules, vec!["DL3049", "DL3050"]);
    assert!(violations.iter().all(|v| v.severity == Severity::Info));
}

#[test]
fn test_continuations_report_first_physical_line() {
    let source = "FROM ubuntu:22.04\nRUN cd /app && \\\n    make && \\\n    make install\n";
    let violations = lint_source(source, &LintConfig::default(), Path::new("Dockerfile"));

    let cd = violations.iter().find(|v| v.rule == "DL3003").unwrap();
    assert_eq!(cd.line, 2);
}

#[test]
fn test_heredoc_body_is_not_linted() {
    // The heredoc body mentions `cd` and `MAINTAINER` but is data, not
    // instructions.
    let source = "FROM ubuntu:22.04\nRUN <<EOF\ncd /tmp\nMAINTAINER nobody\nEOF\n";
    let violations = lint_source(source, &LintConfig::default(), Path::new("Dockerfile"));
    assert!(violations.is_empty(), "unexpected: {:?}", violations);
}

#[test]
fn test_malformed_input_never_panics() {
    let sources = [
        "",
        "FROM",
        "COPY",
        "RUN echo unterminated \\",
        "EXPOSE not-a-port",
        "ONBUILD",
        "FROM a:1\nEXPOSE \"",
        "# hadolint ignore=\nFROM ubuntu:22.04",
    ];
    for source in sources {
        let _ = lint_source(source, &LintConfig::default(), Path::new("Dockerfile"));
    }
}

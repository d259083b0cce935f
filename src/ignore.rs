//! Inline-ignore directive support.
//!
//! A comment directive suppresses specific rule ids for the instruction on the
//! line immediately following the comment:
//!
//! ```dockerfile
//! # dockerfile-lint ignore=DL3006,DL3007
//! FROM ubuntu
//! ```
//!
//! The tool token is case-insensitive and `hadolint` is accepted as an alias
//! so existing directives keep working.

/// Tool tokens recognized in an ignore directive.
const TOOL_TOKENS: [&str; 2] = ["dockerfile-lint", "hadolint"];

/// Parse an ignore directive from a comment line.
///
/// Returns the suppressed rule ids, or `None` if the comment is not a
/// directive. The expected shape is
/// `#\s*(dockerfile-lint|hadolint)\s+ignore\s*=\s*RULE1,RULE2,...`.
pub fn parse_ignore_directive(comment: &str) -> Option<Vec<String>> {
    let trimmed = comment.trim();
    let rest = trimmed.strip_prefix('#')?.trim_start();

    let (tool, rest) = rest.split_once(char::is_whitespace)?;
    if !TOOL_TOKENS
        .iter()
        .any(|token| tool.eq_ignore_ascii_case(token))
    {
        return None;
    }

    let rest = rest.trim_start().strip_prefix("ignore")?;
    let rest = rest.trim_start().strip_prefix('=')?;

    let rules: Vec<String> = rest
        .split(',')
        .map(|rule| rule.trim().to_string())
        .filter(|rule| !rule.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }
    Some(rules)
}

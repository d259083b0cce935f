pub mod config;
pub mod ignore;
pub mod linter;
pub mod parser;
#[cfg(feature = "cli")]
pub mod reporter;
pub mod resolve;
pub mod rules;

pub use config::{ColorMode, ConfigError, LintConfig};
pub use linter::{Linter, Rule, RuleContext, Severity, Violation};
pub use parser::{parse_file, parse_string};
#[cfg(feature = "cli")]
pub use reporter::{OutputFormat, Reporter};

use std::path::Path;

/// Parse and lint Dockerfile source in one call, with the default rule set.
///
/// `path` is only used for labeling violations and is never read.
pub fn lint_source(source: &str, config: &LintConfig, path: &Path) -> Vec<Violation> {
    let dockerfile = parse_string(source);
    Linter::with_default_rules().lint(&dockerfile, config, path)
}

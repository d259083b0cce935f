mod json;
mod text;

use crate::linter::Violation;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print one file's violations. They arrive already sorted by line and
    /// rule id from the linter.
    pub fn report(&self, violations: &[Violation], path: &Path) {
        match self.format {
            OutputFormat::Text => text::report(violations, path),
            OutputFormat::Json => json::report(violations, path),
        }
    }
}

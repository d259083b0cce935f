use crate::linter::Severity;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration for dockerfile-lint loaded from .dockerfile-lint.toml
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LintConfig {
    /// Rule ids disabled for the whole run.
    #[serde(default)]
    pub ignored: Vec<String>,
    /// Registry prefixes images are allowed to come from. Empty means any.
    #[serde(default)]
    pub trusted_registries: Vec<String>,
    /// Label keys every image must declare.
    #[serde(default)]
    pub required_labels: Vec<String>,
    /// Label keys images may declare. Empty means any.
    #[serde(default)]
    pub allowed_labels: Vec<String>,
    /// Per-rule severity overrides, applied after a rule reports.
    #[serde(default)]
    pub severity: HashMap<String, Severity>,
    #[serde(default)]
    pub color: ColorConfig,
}

/// Color output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColorConfig {
    /// Color mode: "auto" (default), "always", or "never"
    #[serde(default)]
    pub ui: ColorMode,
}

/// Color mode for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Automatically detect (default) - respects NO_COLOR env and terminal detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl<'de> Deserialize<'de> for ColorMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(D::Error::custom(format!(
                "invalid color mode '{}', expected 'auto', 'always', or 'never'",
                s
            ))),
        }
    }
}

impl LintConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Find and load .dockerfile-lint.toml from the given directory or its parents
    pub fn find_and_load(dir: &Path) -> Option<Self> {
        let mut current = dir.to_path_buf();

        loop {
            let config_path = current.join(".dockerfile-lint.toml");
            if config_path.exists() {
                return Self::from_file(&config_path).ok();
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Whether a rule id is disabled for the whole run.
    pub fn is_ignored(&self, rule: &str) -> bool {
        self.ignored.iter().any(|r| r == rule)
    }

    /// The configured severity override for a rule, if any.
    pub fn severity_override(&self, rule: &str) -> Option<Severity> {
        self.severity.get(rule).copied()
    }

    /// Get the color mode setting
    pub fn color_mode(&self) -> ColorMode {
        self.color.ui
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: std::path::PathBuf,
        source: toml::de::Error,
    },
}

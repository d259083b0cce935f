use clap::Parser;
use colored::control;
use dockerfile_lint::{
    parse_file, ColorMode, LintConfig, Linter, OutputFormat, Reporter, Severity, Violation,
};
use rayon::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dockerfile-lint")]
#[command(author, version, about = "Lint Dockerfiles", long_about = None)]
struct Cli {
    /// Dockerfiles to lint (glob patterns allowed)
    #[arg(value_name = "FILE", default_value = "Dockerfile")]
    files: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Path to a config file (default: .dockerfile-lint.toml, searched upward)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit successfully when only warnings and notes are found
    #[arg(long)]
    no_fail_on_warnings: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Expand glob patterns; plain paths pass through untouched so missing files
/// still produce a read error instead of silently matching nothing.
fn expand_paths(patterns: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for pattern in patterns {
        if pattern.contains(['*', '?', '[']) {
            match glob::glob(pattern) {
                Ok(entries) => paths.extend(entries.flatten()),
                Err(e) => eprintln!("Invalid pattern '{}': {}", pattern, e),
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }
    paths
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match LintConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        },
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            LintConfig::find_and_load(&cwd).unwrap_or_default()
        }
    };

    if cli.no_color || config.color_mode() == ColorMode::Never {
        control::set_override(false);
    } else if config.color_mode() == ColorMode::Always {
        control::set_override(true);
    }

    let files = expand_paths(&cli.files);
    if files.is_empty() {
        eprintln!("No files to lint");
        return ExitCode::from(2);
    }

    if cli.verbose {
        eprintln!("Linting {} file(s)", files.len());
        for file in &files {
            eprintln!("  - {}", file.display());
        }
    }

    let linter = Linter::with_default_rules();

    // Files lint in parallel; each file's rules run sequentially.
    let results: Vec<(PathBuf, Result<Vec<Violation>, String>)> = files
        .par_iter()
        .map(|path| {
            let result = parse_file(path)
                .map(|dockerfile| linter.lint(&dockerfile, &config, path))
                .map_err(|e| e.to_string());
            (path.clone(), result)
        })
        .collect();

    let reporter = Reporter::new(cli.format.into());
    let mut all_violations = Vec::new();
    let mut has_fatal_error = false;

    for (path, result) in results {
        match result {
            Ok(violations) => {
                reporter.report(&violations, &path);
                all_violations.extend(violations);
            }
            Err(error) => {
                eprintln!("Error reading {}: {}", path.display(), error);
                has_fatal_error = true;
            }
        }
    }

    if has_fatal_error {
        return ExitCode::from(2);
    }

    let has_issues = if cli.no_fail_on_warnings {
        all_violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    } else {
        !all_violations.is_empty()
    };

    if has_issues {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

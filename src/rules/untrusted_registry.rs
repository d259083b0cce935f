use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::resolve::{is_internal_reference, substitute_args};

/// DL3026: base images must come from a trusted registry when one is
/// configured
pub struct UntrustedRegistry;

impl Rule for UntrustedRegistry {
    fn id(&self) -> &'static str {
        "DL3026"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "Use only an allowed registry in the FROM image"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let trusted = &context.config.trusted_registries;
        if trusted.is_empty() {
            return Vec::new();
        }

        let dockerfile = context.dockerfile;
        let defaults = dockerfile.arg_defaults();
        let mut violations = Vec::new();

        for stage in &dockerfile.stages {
            let image = &stage.from.image;
            if image.eq_ignore_ascii_case("scratch") {
                continue;
            }
            if is_internal_reference(image, dockerfile) {
                continue;
            }
            let resolved = substitute_args(image, &defaults);
            if resolved.contains('$') {
                continue;
            }
            if !is_trusted(&resolved, trusted) {
                violations.push(Violation::new(
                    self.id(),
                    self.severity(),
                    "Use only an allowed registry in the FROM image",
                    stage.line,
                ));
            }
        }

        violations
    }
}

/// The registry component of an image reference. A first path segment only
/// names a registry when it looks like a host; otherwise the image comes from
/// Docker Hub.
fn registry(image: &str) -> &str {
    match image.split_once('/') {
        Some((first, _)) if first.contains('.') || first.contains(':') || first == "localhost" => {
            first
        }
        _ => "docker.io",
    }
}

/// A trusted entry matches its registry host (with `*.` wildcard support), or
/// acts as a full image-name prefix (`ghcr.io/acme` trusts
/// `ghcr.io/acme/tool`).
fn is_trusted(image: &str, trusted: &[String]) -> bool {
    let host = registry(image);
    trusted.iter().any(|entry| {
        let entry = entry.trim_end_matches('/');
        if let Some(suffix) = entry.strip_prefix("*.") {
            return host
                .strip_suffix(suffix)
                .is_some_and(|head| head.ends_with('.'));
        }
        host == entry || image == entry || image.starts_with(&format!("{}/", entry))
    })
}

use crate::linter::{Rule, RuleContext, Severity, Violation};
use crate::resolve::{is_internal_reference, substitute_args};

/// DL3006: tag the version of a base image explicitly
pub struct UntaggedImage;

impl Rule for UntaggedImage {
    fn id(&self) -> &'static str {
        "DL3006"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "Always tag the version of an image explicitly"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        let dockerfile = context.dockerfile;
        let defaults = dockerfile.arg_defaults();
        let mut violations = Vec::new();

        for stage in &dockerfile.stages {
            let from = &stage.from;
            if from.is_pinned() {
                continue;
            }
            // scratch is the empty image; there is nothing to pin.
            if from.image.eq_ignore_ascii_case("scratch") {
                continue;
            }
            // Earlier-stage references are pinned by construction. This covers
            // plain aliases, ARG-substituted aliases, and platform-conditional
            // names like `base-$TARGETARCH`.
            if is_internal_reference(&from.image, dockerfile) {
                continue;
            }

            let resolved = substitute_args(&from.image, &defaults);
            // ARG defaults may carry the tag (`ARG BASE=ubuntu:22.04`).
            if resolved.contains(':') || resolved.contains('@') {
                continue;
            }
            // An unresolved variable has an unknowable value.
            if resolved.contains('$') {
                continue;
            }
            if resolved.eq_ignore_ascii_case("scratch") {
                continue;
            }

            violations.push(Violation::new(
                self.id(),
                self.severity(),
                "Always tag the version of an image explicitly",
                stage.line,
            ));
        }

        violations
    }
}

use crate::linter::{Rule, RuleContext, Severity, Violation};

/// DL4000: MAINTAINER is deprecated in favor of LABEL maintainer
pub struct MaintainerDeprecated;

impl Rule for MaintainerDeprecated {
    fn id(&self) -> &'static str {
        "DL4000"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "MAINTAINER is deprecated"
    }

    fn check(&self, context: &RuleContext) -> Vec<Violation> {
        context
            .dockerfile
            .instructions()
            .filter(|instruction| instruction.is("MAINTAINER"))
            .map(|instruction| {
                Violation::new(
                    self.id(),
                    self.severity(),
                    "MAINTAINER is deprecated",
                    instruction.line,
                )
            })
            .collect()
    }
}

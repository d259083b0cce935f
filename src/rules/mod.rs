pub mod copy_over_add;
pub mod copy_without_workdir;
pub mod duplicate_stage_alias;
pub mod invalid_expose_port;
pub mod json_notation_cmd_entrypoint;
pub mod last_user_root;
pub mod latest_tag;
pub mod maintainer_deprecated;
pub mod missing_required_label;
pub mod onbuild_forbidden;
pub mod run_cd_usage;
pub mod superfluous_label;
pub mod untagged_image;
pub mod untrusted_registry;
pub mod workdir_absolute;

pub use copy_over_add::CopyOverAdd;
pub use copy_without_workdir::CopyWithoutWorkdir;
pub use duplicate_stage_alias::DuplicateStageAlias;
pub use invalid_expose_port::InvalidExposePort;
pub use json_notation_cmd_entrypoint::JsonNotationCmdEntrypoint;
pub use last_user_root::LastUserRoot;
pub use latest_tag::LatestTag;
pub use maintainer_deprecated::MaintainerDeprecated;
pub use missing_required_label::MissingRequiredLabel;
pub use onbuild_forbidden::OnbuildForbidden;
pub use run_cd_usage::RunCdUsage;
pub use superfluous_label::SuperfluousLabel;
pub use untagged_image::UntaggedImage;
pub use untrusted_registry::UntrustedRegistry;
pub use workdir_absolute::WorkdirAbsolute;

use crate::linter::Rule;

/// Every built-in rule, in rule-id order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(WorkdirAbsolute),
        Box::new(LastUserRoot),
        Box::new(RunCdUsage),
        Box::new(UntaggedImage),
        Box::new(LatestTag),
        Box::new(InvalidExposePort),
        Box::new(CopyOverAdd),
        Box::new(DuplicateStageAlias),
        Box::new(JsonNotationCmdEntrypoint),
        Box::new(UntrustedRegistry),
        Box::new(OnbuildForbidden),
        Box::new(CopyWithoutWorkdir),
        Box::new(MissingRequiredLabel),
        Box::new(SuperfluousLabel),
        Box::new(MaintainerDeprecated),
    ]
}

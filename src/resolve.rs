//! Resolution helpers for cross-instruction semantics.
//!
//! The raw Dockerfile grammar does not make build-argument substitution,
//! stage-alias references, inherited properties, or platform-conditional
//! identifiers explicit. These pure, stateless helpers reconstruct them once
//! so individual rules can ask simple questions instead of re-deriving the
//! logic each time.

use crate::parser::ast::{Dockerfile, Stage};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Docker's implicit build ARGs with finite, build-time-only value sets.
/// Each set has at most 8 entries, keeping combinatorial expansion bounded.
const PLATFORM_PLACEHOLDERS: &[(&str, &[&str])] = &[
    (
        "TARGETPLATFORM",
        &[
            "linux/amd64",
            "linux/arm64",
            "linux/arm/v7",
            "linux/arm/v6",
            "linux/386",
            "linux/ppc64le",
            "linux/s390x",
            "windows/amd64",
        ],
    ),
    (
        "TARGETARCH",
        &[
            "amd64", "arm64", "arm", "386", "ppc64le", "s390x", "riscv64", "mips64le",
        ],
    ),
    ("TARGETOS", &["linux", "windows"]),
    ("TARGETVARIANT", &["", "v5", "v6", "v7", "v8"]),
    (
        "BUILDARCH",
        &[
            "amd64", "arm64", "arm", "386", "ppc64le", "s390x", "riscv64", "mips64le",
        ],
    ),
    ("BUILDOS", &["linux", "windows"]),
];

/// Resolve `$NAME` and `${NAME}` fragments against declared ARG defaults.
///
/// Single pass: substituted values are not scanned again, so ARG-referencing-
/// ARG chains stay unresolved. Names without a default pass through unchanged.
pub fn substitute_args(text: &str, args: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(inner) = after.strip_prefix('{') {
            let Some(end) = inner.find('}') else {
                // No closing brace: pass through.
                out.push('$');
                rest = after;
                continue;
            };
            let name = &inner[..end];
            match args.get(name) {
                Some(value) if is_identifier(name) => out.push_str(value),
                _ => out.push_str(&rest[pos..pos + end + 3]),
            }
            rest = &inner[end + 1..];
            continue;
        }

        let name_len = after
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .count();
        if name_len == 0 {
            out.push('$');
            rest = after;
            continue;
        }
        let name = &after[..name_len];
        match args.get(name) {
            Some(value) => out.push_str(value),
            None => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[name_len..];
    }

    out.push_str(rest);
    out
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Map of lower-cased stage alias to stage index. Later duplicates win;
/// alias uniqueness is a rule's concern, not the resolver's.
pub fn stage_aliases(dockerfile: &Dockerfile) -> HashMap<String, usize> {
    let mut aliases = HashMap::new();
    for stage in &dockerfile.stages {
        if let Some(alias) = stage.alias() {
            aliases.insert(alias, stage.index);
        }
    }
    aliases
}

/// Whether a FROM or `--from` target refers to an earlier stage rather than an
/// external image: a direct alias match, a numeric stage index, a match after
/// ARG substitution, or a match after platform-placeholder expansion.
pub fn is_internal_reference(target: &str, dockerfile: &Dockerfile) -> bool {
    let aliases = stage_aliases(dockerfile);
    if aliases.contains_key(&target.to_lowercase()) {
        return true;
    }
    if let Ok(index) = target.parse::<usize>() {
        return index < dockerfile.stages.len();
    }

    let substituted = substitute_args(target, &dockerfile.arg_defaults());
    if aliases.contains_key(&substituted.to_lowercase()) {
        return true;
    }

    if let Some(candidates) = expand_platform_placeholders(&substituted) {
        return candidates
            .iter()
            .any(|candidate| aliases.contains_key(&candidate.to_lowercase()));
    }

    false
}

/// Walk the parent-alias chain from a stage, short-circuiting on the first
/// stage (including the starting one) satisfying the predicate. A visited set
/// guarantees termination on alias cycles; an unresolved cycle yields `false`.
pub fn stage_or_ancestor<F>(dockerfile: &Dockerfile, stage: &Stage, predicate: F) -> bool
where
    F: Fn(&Stage) -> bool,
{
    let aliases = stage_aliases(dockerfile);
    let defaults = dockerfile.arg_defaults();
    let mut visited: HashSet<usize> = HashSet::new();
    let mut current = stage;

    loop {
        if !visited.insert(current.index) {
            return false;
        }
        if predicate(current) {
            return true;
        }
        let parent = current.from.image.to_lowercase();
        let index = match aliases.get(&parent) {
            Some(&index) => index,
            None => {
                let substituted = substitute_args(&current.from.image, &defaults).to_lowercase();
                match aliases.get(&substituted) {
                    Some(&index) => index,
                    None => return false,
                }
            }
        };
        current = &dockerfile.stages[index];
    }
}

/// Expand a target containing only platform placeholders into every
/// combination of their known values.
///
/// Returns `None` when the target contains no placeholder, or contains any
/// variable that is not a platform placeholder (those have unknowable values
/// and cannot be enumerated).
pub fn expand_platform_placeholders(text: &str) -> Option<Vec<String>> {
    let mut candidates = vec![String::new()];
    let mut saw_placeholder = false;
    let mut rest = text;

    while let Some(pos) = rest.find('$') {
        let literal = &rest[..pos];
        let after = &rest[pos + 1..];

        let (name, remaining) = if let Some(inner) = after.strip_prefix('{') {
            let end = inner.find('}')?;
            (&inner[..end], &inner[end + 1..])
        } else {
            let name_len = after
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .count();
            if name_len == 0 {
                return None;
            }
            (&after[..name_len], &after[name_len..])
        };

        let values = PLATFORM_PLACEHOLDERS
            .iter()
            .find(|(placeholder, _)| *placeholder == name)
            .map(|(_, values)| *values)?;
        saw_placeholder = true;

        if candidates.len() * values.len() > 512 {
            return None;
        }
        let mut expanded = Vec::with_capacity(candidates.len() * values.len());
        for candidate in &candidates {
            for value in values {
                let mut next = candidate.clone();
                next.push_str(literal);
                next.push_str(value);
                expanded.push(next);
            }
        }
        candidates = expanded;
        rest = remaining;
    }

    if !saw_placeholder {
        return None;
    }
    for candidate in &mut candidates {
        candidate.push_str(rest);
    }
    Some(candidates)
}

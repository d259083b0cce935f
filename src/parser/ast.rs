//! AST types for Dockerfiles.
//!
//! The root [`Dockerfile`] is immutable once built: ordered stages, global
//! pre-FROM ARG declarations, comments, and a map of inline-ignore directives
//! keyed by line. All types derive `PartialEq` so parsing the same text twice
//! yields structurally equal values.

use std::collections::{BTreeMap, HashMap, HashSet};

/// Root of a parsed Dockerfile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dockerfile {
    /// Build stages in source order.
    pub stages: Vec<Stage>,
    /// ARG instructions that precede the first FROM.
    pub global_args: Vec<Instruction>,
    /// All comments in source order.
    pub comments: Vec<Comment>,
    /// Inline-ignore directives: line number -> suppressed rule ids.
    pub ignores: HashMap<usize, HashSet<String>>,
}

impl Dockerfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over every instruction in source order: global ARGs first, then
    /// each stage's body. Stage FROMs are carried by [`Stage`] itself.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.global_args
            .iter()
            .chain(self.stages.iter().flat_map(|s| s.instructions.iter()))
    }

    /// Whether a rule id is suppressed by an inline-ignore directive at `line`.
    pub fn is_ignored(&self, rule: &str, line: usize) -> bool {
        self.ignores
            .get(&line)
            .map(|rules| rules.contains(rule))
            .unwrap_or(false)
    }

    /// Default values of every declared ARG (global and per-stage), for
    /// build-argument substitution. ARGs without a default are absent.
    pub fn arg_defaults(&self) -> BTreeMap<String, String> {
        let mut defaults = BTreeMap::new();
        for instruction in self.instructions() {
            if let InstructionKind::Arg {
                name,
                default: Some(value),
            } = &instruction.kind
            {
                defaults.insert(name.clone(), value.clone());
            }
        }
        defaults
    }
}

/// A comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// The comment text including the leading `#`.
    pub text: String,
    pub line: usize,
}

/// One build stage: a FROM and the instructions until the next FROM.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    /// 0-based position of this stage in the file.
    pub index: usize,
    /// Line of the FROM instruction.
    pub line: usize,
    /// Parsed FROM payload.
    pub from: FromArgs,
    /// Body instructions in source order.
    pub instructions: Vec<Instruction>,
}

impl Stage {
    /// The stage alias in lower case, if one was declared with `AS`.
    pub fn alias(&self) -> Option<String> {
        self.from.alias.as_ref().map(|a| a.to_lowercase())
    }
}

/// One instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Uppercased keyword (`RUN`, `COPY`, ...).
    pub keyword: String,
    pub line: usize,
    /// Argument text after the keyword, continuations joined, flags included.
    pub raw_args: String,
    /// Leading `--flag[=value]` options, in flag-name order.
    pub flags: BTreeMap<String, String>,
    pub kind: InstructionKind,
}

impl Instruction {
    pub fn is(&self, keyword: &str) -> bool {
        self.keyword == keyword
    }
}

/// Keyword-specific payloads. Unrecognized keywords degrade to [`Other`]
/// rather than aborting the parse.
///
/// [`Other`]: InstructionKind::Other
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionKind {
    /// A FROM outside stage position (only reachable nested in ONBUILD).
    From(FromArgs),
    Run { command: String },
    Cmd(CommandArgs),
    Entrypoint(CommandArgs),
    Copy(CopyArgs),
    Add(CopyArgs),
    Env { pairs: Vec<(String, String)> },
    Label { pairs: Vec<(String, String)> },
    Arg { name: String, default: Option<String> },
    Expose { ports: Vec<PortSpec> },
    Workdir { path: String },
    User { user: String },
    Healthcheck(Healthcheck),
    Onbuild(Box<Instruction>),
    /// Opaque payload for unrecognized or untyped keywords.
    Other,
}

/// Parsed FROM payload: `image[:tag|@digest] [AS alias]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FromArgs {
    /// Image reference without tag or digest. May contain `$ARG` fragments.
    pub image: String,
    pub tag: Option<String>,
    pub digest: Option<String>,
    pub alias: Option<String>,
    /// Value of a leading `--platform` flag.
    pub platform: Option<String>,
}

impl FromArgs {
    /// Whether the image is pinned to a tag or digest.
    pub fn is_pinned(&self) -> bool {
        self.tag.is_some() || self.digest.is_some()
    }
}

/// CMD/ENTRYPOINT payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    /// The JSON exec form, when the payload parsed as a string array.
    pub exec: Option<Vec<String>>,
    /// Raw payload text.
    pub command: String,
}

/// COPY/ADD payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyArgs {
    pub sources: Vec<String>,
    pub dest: String,
    /// Value of a `--from` flag: an earlier stage alias, index, or image.
    pub from: Option<String>,
    pub chown: Option<String>,
    pub chmod: Option<String>,
}

/// One EXPOSE entry: port (kept textual for ranges and variables) and
/// optional protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub port: String,
    pub protocol: Option<String>,
}

/// HEALTHCHECK payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Healthcheck {
    /// `HEALTHCHECK NONE`
    None,
    /// The probe command text after `CMD`.
    Cmd(String),
}

//! Dockerfile parser.
//!
//! Parsing is best-effort structural recovery, not grammar validation: any
//! keyword is accepted, unrecognized instructions degrade to opaque nodes, and
//! malformed payloads fall back to permissive defaults. The goal is to let as
//! many lint rules as possible run meaningfully on imperfect input, so
//! [`parse_string`] never fails; only reading a file from disk can.

pub mod ast;
pub mod lexer;
pub mod words;

use ast::{
    Comment, CommandArgs, CopyArgs, Dockerfile, FromArgs, Healthcheck, Instruction,
    InstructionKind, PortSpec, Stage,
};
use lexer::{tokenize, TokenKind};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use words::{parse_json_array, split_words};

use crate::ignore::parse_ignore_directive;

/// Parse a Dockerfile from disk.
pub fn parse_file(path: &Path) -> io::Result<Dockerfile> {
    let content = fs::read_to_string(path)?;
    Ok(parse_string(&content))
}

/// Parse Dockerfile source into an AST. Never fails on malformed input.
pub fn parse_string(source: &str) -> Dockerfile {
    let mut dockerfile = Dockerfile::new();
    let mut current: Option<Stage> = None;

    for token in tokenize(source) {
        match token.kind {
            TokenKind::Blank => {}
            TokenKind::Comment(text) => {
                if let Some(rules) = parse_ignore_directive(&text) {
                    // The directive suppresses rules on the line immediately
                    // following the comment.
                    dockerfile
                        .ignores
                        .entry(token.line + 1)
                        .or_default()
                        .extend(rules);
                }
                dockerfile.comments.push(Comment {
                    text,
                    line: token.line,
                });
            }
            TokenKind::Instruction(text) => {
                match parse_instruction(&text, token.line) {
                    Instruction {
                        kind: InstructionKind::From(from),
                        line,
                        ..
                    } => {
                        if let Some(stage) = current.take() {
                            dockerfile.stages.push(stage);
                        }
                        current = Some(Stage {
                            index: dockerfile.stages.len(),
                            line,
                            from,
                            instructions: Vec::new(),
                        });
                    }
                    instruction => {
                        if let Some(stage) = current.as_mut() {
                            stage.instructions.push(instruction);
                        } else if matches!(instruction.kind, InstructionKind::Arg { .. }) {
                            dockerfile.global_args.push(instruction);
                        }
                        // Pre-FROM instructions other than ARG have no stage to
                        // belong to and are dropped.
                    }
                }
            }
        }
    }

    if let Some(stage) = current {
        dockerfile.stages.push(stage);
    }

    dockerfile
}

/// Parse one joined instruction line into a typed node.
fn parse_instruction(text: &str, line: usize) -> Instruction {
    let trimmed = text.trim();
    let (keyword_raw, remainder) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (trimmed, ""),
    };
    let keyword = keyword_raw.to_uppercase();
    let (flags, rest) = split_options(remainder);

    let kind = match keyword.as_str() {
        "FROM" => InstructionKind::From(parse_from(rest, &flags)),
        "RUN" => InstructionKind::Run {
            command: rest.to_string(),
        },
        "CMD" => InstructionKind::Cmd(parse_command(rest)),
        "ENTRYPOINT" => InstructionKind::Entrypoint(parse_command(rest)),
        "COPY" => InstructionKind::Copy(parse_copy(rest, &flags)),
        "ADD" => InstructionKind::Add(parse_copy(rest, &flags)),
        "ENV" => InstructionKind::Env {
            pairs: parse_pairs(rest),
        },
        "LABEL" => InstructionKind::Label {
            pairs: parse_pairs(rest),
        },
        "ARG" => parse_arg(rest),
        "EXPOSE" => InstructionKind::Expose {
            ports: parse_expose(rest),
        },
        "WORKDIR" => InstructionKind::Workdir {
            path: first_word_or_rest(rest),
        },
        "USER" => InstructionKind::User {
            user: first_word_or_rest(rest),
        },
        "HEALTHCHECK" => InstructionKind::Healthcheck(parse_healthcheck(rest)),
        "ONBUILD" => InstructionKind::Onbuild(Box::new(parse_instruction(rest, line))),
        _ => InstructionKind::Other,
    };

    Instruction {
        keyword,
        line,
        raw_args: remainder.to_string(),
        flags,
        kind,
    }
}

/// Strip leading `--flag` / `--flag=value` tokens into a map, stopping at the
/// first non-flag token (which includes the `[` of a JSON array).
fn split_options(input: &str) -> (BTreeMap<String, String>, &str) {
    let mut flags = BTreeMap::new();
    let mut rest = input.trim_start();

    while rest.starts_with("--") {
        let token_end = rest
            .find(char::is_whitespace)
            .unwrap_or(rest.len());
        let body = &rest[2..token_end];
        if body.is_empty() {
            break;
        }
        match body.split_once('=') {
            Some((name, value)) => flags.insert(name.to_string(), value.to_string()),
            None => flags.insert(body.to_string(), String::new()),
        };
        rest = rest[token_end..].trim_start();
    }

    (flags, rest)
}

/// `image[:tag|@digest] [AS alias]`
fn parse_from(rest: &str, flags: &BTreeMap<String, String>) -> FromArgs {
    let words = split_words(rest);
    let mut from = FromArgs {
        platform: flags.get("platform").cloned(),
        ..FromArgs::default()
    };

    if let Some(reference) = words.first() {
        // Tag and digest are mutually exclusive: split on the first `@`,
        // then on the first `:`.
        if let Some((image, digest)) = reference.text.split_once('@') {
            from.image = image.to_string();
            from.digest = Some(digest.to_string());
        } else if let Some((image, tag)) = reference.text.split_once(':') {
            from.image = image.to_string();
            from.tag = Some(tag.to_string());
        } else {
            from.image = reference.text.clone();
        }
    }

    if words.len() >= 3 && words[1].text.eq_ignore_ascii_case("as") {
        from.alias = Some(words[2].text.clone());
    }

    from
}

fn parse_command(rest: &str) -> CommandArgs {
    CommandArgs {
        exec: parse_json_array(rest),
        command: rest.to_string(),
    }
}

fn parse_copy(rest: &str, flags: &BTreeMap<String, String>) -> CopyArgs {
    let mut args = CopyArgs {
        from: flags.get("from").cloned(),
        chown: flags.get("chown").cloned(),
        chmod: flags.get("chmod").cloned(),
        ..CopyArgs::default()
    };

    // The JSON array form takes precedence over shell-word splitting.
    let mut elements = match parse_json_array(rest) {
        Some(array) => array,
        None => split_words(rest).into_iter().map(|w| w.text).collect(),
    };
    if let Some(dest) = elements.pop() {
        args.dest = dest;
        args.sources = elements;
    }

    args
}

/// Scan for `key=` pairs with double-quoted, single-quoted, or bare values.
/// When no pairs are found, fall back to the legacy two-token `KEY VALUE`
/// form, stripping one quote layer from the value.
fn parse_pairs(rest: &str) -> Vec<(String, String)> {
    let pairs = scan_pairs(rest);
    if !pairs.is_empty() {
        return pairs;
    }

    match rest.split_once(char::is_whitespace) {
        Some((key, value)) => vec![(key.to_string(), strip_quotes(value.trim()))],
        None => Vec::new(),
    }
}

fn scan_pairs(input: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let key = match chars.peek() {
            Some(&quote @ ('"' | '\'')) => {
                chars.next();
                read_until_quote(&mut chars, quote)
            }
            _ => {
                let mut key = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '=' || c.is_whitespace() {
                        break;
                    }
                    key.push(c);
                    chars.next();
                }
                key
            }
        };

        if chars.peek() != Some(&'=') {
            // Not a K=V token; skip the rest of it.
            while matches!(chars.peek(), Some(c) if !c.is_whitespace()) {
                chars.next();
            }
            continue;
        }
        chars.next();

        let value = match chars.peek() {
            Some(&quote @ ('"' | '\'')) => {
                chars.next();
                read_until_quote(&mut chars, quote)
            }
            _ => {
                let mut value = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    if c == '\\' {
                        chars.next();
                        if let Some(escaped) = chars.next() {
                            value.push(escaped);
                        }
                        continue;
                    }
                    value.push(c);
                    chars.next();
                }
                value
            }
        };

        if !key.is_empty() {
            pairs.push((key, value));
        }
    }

    pairs
}

fn read_until_quote(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, quote: char) -> String {
    let mut text = String::new();
    while let Some(c) = chars.next() {
        if c == quote {
            break;
        }
        if c == '\\' && quote == '"' {
            if let Some(escaped) = chars.next() {
                text.push(escaped);
            }
            continue;
        }
        text.push(c);
    }
    text
}

/// `NAME` or `NAME=default`, quotes stripped from the default.
fn parse_arg(rest: &str) -> InstructionKind {
    let rest = rest.trim();
    match rest.split_once('=') {
        Some((name, default)) => InstructionKind::Arg {
            name: name.trim().to_string(),
            default: Some(strip_quotes(default.trim())),
        },
        None => InstructionKind::Arg {
            name: rest.to_string(),
            default: None,
        },
    }
}

fn parse_expose(rest: &str) -> Vec<PortSpec> {
    split_words(rest)
        .into_iter()
        .map(|word| match word.text.split_once('/') {
            Some((port, protocol)) => PortSpec {
                port: port.to_string(),
                protocol: Some(protocol.to_string()),
            },
            None => PortSpec {
                port: word.text,
                protocol: None,
            },
        })
        .collect()
}

/// `NONE`, or the probe command text after `CMD`.
fn parse_healthcheck(rest: &str) -> Healthcheck {
    let trimmed = rest.trim();
    if trimmed.eq_ignore_ascii_case("NONE") {
        return Healthcheck::None;
    }
    match trimmed.split_once(char::is_whitespace) {
        Some((first, command)) if first.eq_ignore_ascii_case("CMD") => {
            Healthcheck::Cmd(command.trim().to_string())
        }
        _ => Healthcheck::Cmd(trimmed.to_string()),
    }
}

fn first_word_or_rest(rest: &str) -> String {
    split_words(rest)
        .into_iter()
        .next()
        .map(|w| w.text)
        .unwrap_or_else(|| rest.to_string())
}

fn strip_quotes(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        return value[1..value.len() - 1].to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_stage() {
        let dockerfile = parse_string("FROM ubuntu\nWORKDIR app");
        assert_eq!(dockerfile.stages.len(), 1);

        let stage = &dockerfile.stages[0];
        assert_eq!(stage.from.image, "ubuntu");
        assert_eq!(stage.from.tag, None);
        assert_eq!(stage.instructions.len(), 1);
        assert_eq!(
            stage.instructions[0].kind,
            InstructionKind::Workdir {
                path: "app".to_string(),
            }
        );
        assert_eq!(stage.instructions[0].line, 2);
    }

    #[test]
    fn test_from_with_tag() {
        let dockerfile = parse_string("FROM ubuntu:22.04");
        assert_eq!(dockerfile.stages[0].from.image, "ubuntu");
        assert_eq!(dockerfile.stages[0].from.tag, Some("22.04".to_string()));
        assert_eq!(dockerfile.stages[0].from.digest, None);
    }

    #[test]
    fn test_from_with_digest() {
        let dockerfile = parse_string("FROM ubuntu@sha256:abc123");
        let from = &dockerfile.stages[0].from;
        assert_eq!(from.image, "ubuntu");
        assert_eq!(from.digest, Some("sha256:abc123".to_string()));
        assert_eq!(from.tag, None);
    }

    #[test]
    fn test_from_with_alias_and_platform() {
        let dockerfile = parse_string("FROM --platform=$BUILDPLATFORM golang:1.22 AS builder");
        let from = &dockerfile.stages[0].from;
        assert_eq!(from.image, "golang");
        assert_eq!(from.tag, Some("1.22".to_string()));
        assert_eq!(from.alias, Some("builder".to_string()));
        assert_eq!(from.platform, Some("$BUILDPLATFORM".to_string()));
    }

    #[test]
    fn test_multiple_stages_are_indexed() {
        let dockerfile = parse_string("FROM a AS one\nRUN true\nFROM b\nRUN false");
        assert_eq!(dockerfile.stages.len(), 2);
        assert_eq!(dockerfile.stages[0].index, 0);
        assert_eq!(dockerfile.stages[1].index, 1);
        assert_eq!(dockerfile.stages[0].instructions.len(), 1);
        assert_eq!(dockerfile.stages[1].instructions.len(), 1);
    }

    #[test]
    fn test_global_args_before_first_from() {
        let dockerfile = parse_string("ARG VERSION=1.0\nARG OTHER\nFROM ubuntu:$VERSION");
        assert_eq!(dockerfile.global_args.len(), 2);
        assert_eq!(
            dockerfile.global_args[0].kind,
            InstructionKind::Arg {
                name: "VERSION".to_string(),
                default: Some("1.0".to_string()),
            }
        );
        assert_eq!(
            dockerfile.global_args[1].kind,
            InstructionKind::Arg {
                name: "OTHER".to_string(),
                default: None,
            }
        );
    }

    #[test]
    fn test_arg_default_quotes_stripped() {
        let dockerfile = parse_string("FROM a\nARG NAME=\"quoted value\"");
        assert_eq!(
            dockerfile.stages[0].instructions[0].kind,
            InstructionKind::Arg {
                name: "NAME".to_string(),
                default: Some("quoted value".to_string()),
            }
        );
    }

    #[test]
    fn test_copy_shell_form() {
        let dockerfile = parse_string("FROM a\nCOPY src1 src2 /dest/");
        match &dockerfile.stages[0].instructions[0].kind {
            InstructionKind::Copy(copy) => {
                assert_eq!(copy.sources, vec!["src1", "src2"]);
                assert_eq!(copy.dest, "/dest/");
                assert_eq!(copy.from, None);
            }
            other => panic!("expected Copy, got {:?}", other),
        }
    }

    #[test]
    fn test_copy_json_form_takes_precedence() {
        let dockerfile = parse_string(r#"FROM a
COPY ["my file.txt", "other.txt", "/dest/"]"#);
        match &dockerfile.stages[0].instructions[0].kind {
            InstructionKind::Copy(copy) => {
                assert_eq!(copy.sources, vec!["my file.txt", "other.txt"]);
                assert_eq!(copy.dest, "/dest/");
            }
            other => panic!("expected Copy, got {:?}", other),
        }
    }

    #[test]
    fn test_copy_flags() {
        let dockerfile =
            parse_string("FROM a\nCOPY --from=builder --chown=app:app /src /dst");
        let instruction = &dockerfile.stages[0].instructions[0];
        assert_eq!(
            instruction.flags.get("from").map(String::as_str),
            Some("builder")
        );
        match &instruction.kind {
            InstructionKind::Copy(copy) => {
                assert_eq!(copy.from, Some("builder".to_string()));
                assert_eq!(copy.chown, Some("app:app".to_string()));
                assert_eq!(copy.sources, vec!["/src"]);
                assert_eq!(copy.dest, "/dst");
            }
            other => panic!("expected Copy, got {:?}", other),
        }
    }

    #[test]
    fn test_env_key_value_pairs() {
        let dockerfile = parse_string(r#"FROM a
ENV FOO=bar BAZ="quoted value" QUX='single'"#);
        match &dockerfile.stages[0].instructions[0].kind {
            InstructionKind::Env { pairs } => {
                assert_eq!(
                    pairs,
                    &vec![
                        ("FOO".to_string(), "bar".to_string()),
                        ("BAZ".to_string(), "quoted value".to_string()),
                        ("QUX".to_string(), "single".to_string()),
                    ]
                );
            }
            other => panic!("expected Env, got {:?}", other),
        }
    }

    #[test]
    fn test_env_legacy_form() {
        let dockerfile = parse_string("FROM a\nENV PATH \"/usr/local/bin\"");
        match &dockerfile.stages[0].instructions[0].kind {
            InstructionKind::Env { pairs } => {
                assert_eq!(
                    pairs,
                    &vec![("PATH".to_string(), "/usr/local/bin".to_string())]
                );
            }
            other => panic!("expected Env, got {:?}", other),
        }
    }

    #[test]
    fn test_label_quoted_keys() {
        let dockerfile = parse_string(r#"FROM a
LABEL "com.example.vendor"="ACME" version=1.0"#);
        match &dockerfile.stages[0].instructions[0].kind {
            InstructionKind::Label { pairs } => {
                assert_eq!(
                    pairs,
                    &vec![
                        ("com.example.vendor".to_string(), "ACME".to_string()),
                        ("version".to_string(), "1.0".to_string()),
                    ]
                );
            }
            other => panic!("expected Label, got {:?}", other),
        }
    }

    #[test]
    fn test_expose_ports_and_protocols() {
        let dockerfile = parse_string("FROM a\nEXPOSE 80 443/tcp 53/udp");
        match &dockerfile.stages[0].instructions[0].kind {
            InstructionKind::Expose { ports } => {
                assert_eq!(
                    ports,
                    &vec![
                        PortSpec {
                            port: "80".to_string(),
                            protocol: None,
                        },
                        PortSpec {
                            port: "443".to_string(),
                            protocol: Some("tcp".to_string()),
                        },
                        PortSpec {
                            port: "53".to_string(),
                            protocol: Some("udp".to_string()),
                        },
                    ]
                );
            }
            other => panic!("expected Expose, got {:?}", other),
        }
    }

    #[test]
    fn test_healthcheck_none_and_cmd() {
        let dockerfile =
            parse_string("FROM a\nHEALTHCHECK NONE\nHEALTHCHECK --interval=5s CMD curl -f http://localhost/");
        let instructions = &dockerfile.stages[0].instructions;
        assert_eq!(
            instructions[0].kind,
            InstructionKind::Healthcheck(Healthcheck::None)
        );
        assert_eq!(
            instructions[1].kind,
            InstructionKind::Healthcheck(Healthcheck::Cmd(
                "curl -f http://localhost/".to_string()
            ))
        );
        assert_eq!(
            instructions[1].flags.get("interval").map(String::as_str),
            Some("5s")
        );
    }

    #[test]
    fn test_onbuild_nested_instruction() {
        let dockerfile = parse_string("FROM a\nONBUILD RUN make build");
        match &dockerfile.stages[0].instructions[0].kind {
            InstructionKind::Onbuild(nested) => {
                assert_eq!(nested.keyword, "RUN");
                assert_eq!(
                    nested.kind,
                    InstructionKind::Run {
                        command: "make build".to_string(),
                    }
                );
            }
            other => panic!("expected Onbuild, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_keyword_degrades_to_other() {
        let dockerfile = parse_string("FROM a\nFROBNICATE --fast now");
        let instruction = &dockerfile.stages[0].instructions[0];
        assert_eq!(instruction.keyword, "FROBNICATE");
        assert_eq!(instruction.kind, InstructionKind::Other);
        assert_eq!(instruction.flags.get("fast").map(String::as_str), Some(""));
    }

    #[test]
    fn test_keyword_case_insensitive() {
        let dockerfile = parse_string("from ubuntu:22.04\nrun true");
        assert_eq!(dockerfile.stages.len(), 1);
        assert_eq!(dockerfile.stages[0].instructions[0].keyword, "RUN");
    }

    #[test]
    fn test_run_heredoc_body_excluded() {
        let dockerfile = parse_string("FROM a\nRUN <<EOF\npip install x\nEOF");
        match &dockerfile.stages[0].instructions[0].kind {
            InstructionKind::Run { command } => {
                assert!(!command.contains("pip install"));
                assert_eq!(command, "<<EOF");
            }
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_inline_ignore_attaches_to_following_line() {
        let dockerfile = parse_string("# hadolint ignore=DL3006,DL3007\nFROM ubuntu");
        assert!(dockerfile.is_ignored("DL3006", 2));
        assert!(dockerfile.is_ignored("DL3007", 2));
        assert!(!dockerfile.is_ignored("DL3006", 1));
        assert!(!dockerfile.is_ignored("DL3006", 3));
    }

    #[test]
    fn test_comments_are_collected() {
        let dockerfile = parse_string("# first\nFROM a\n# second");
        let texts: Vec<&str> = dockerfile.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["# first", "# second"]);
    }

    #[test]
    fn test_pre_from_non_arg_instructions_are_dropped() {
        let dockerfile = parse_string("RUN too-early\nFROM a");
        assert!(dockerfile.global_args.is_empty());
        assert_eq!(dockerfile.stages.len(), 1);
        assert!(dockerfile.stages[0].instructions.is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "ARG V=1\nFROM ubuntu:$V AS base\n# hadolint ignore=DL3045\nCOPY a b\nFROM base\nRUN true";
        assert_eq!(parse_string(source), parse_string(source));
    }

    #[test]
    fn test_split_options_stops_at_first_positional() {
        let (flags, rest) = split_options("--from=builder --link /src /dst");
        assert_eq!(flags.get("from").map(String::as_str), Some("builder"));
        assert_eq!(flags.get("link").map(String::as_str), Some(""));
        assert_eq!(rest, "/src /dst");
    }

    #[test]
    fn test_split_options_stops_at_json_array() {
        let (flags, rest) = split_options(r#"["a", "--b"]"#);
        assert!(flags.is_empty());
        assert_eq!(rest, r#"["a", "--b"]"#);
    }
}

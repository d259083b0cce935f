//! Line-oriented lexer for Dockerfiles.
//!
//! Unlike a character-level lexer, Dockerfile tokenization works on physical
//! lines: a token is a blank line, a comment line, or one logical instruction
//! with its continuation lines joined and any heredoc bodies swallowed. The
//! lexer never fails; unterminated continuations and heredocs consume to the
//! end of the input.

/// Token types for a Dockerfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A line containing only whitespace.
    Blank,
    /// A comment line (`# ...`), trimmed. Comments never join continuations.
    Comment(String),
    /// One logical instruction with continuations joined into a single line.
    /// Heredoc body lines are consumed but excluded from the text.
    Instruction(String),
}

/// A token with the 1-indexed line of its first physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// Tokenize Dockerfile source into blank/comment/instruction tokens.
///
/// Every physical line of the input is accounted for by exactly one token:
/// either as a token of its own, or as part of an instruction's continuation
/// or heredoc body.
pub fn tokenize(source: &str) -> Vec<Token> {
    let lines: Vec<&str> = source.lines().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let start_line = i + 1;
        let trimmed = lines[i].trim();

        if trimmed.is_empty() {
            tokens.push(Token {
                kind: TokenKind::Blank,
                line: start_line,
            });
            i += 1;
            continue;
        }

        if trimmed.starts_with('#') {
            tokens.push(Token {
                kind: TokenKind::Comment(trimmed.to_string()),
                line: start_line,
            });
            i += 1;
            continue;
        }

        let mut text = lines[i].to_string();
        i += 1;

        while ends_with_continuation(&text) {
            let Some(&next) = lines.get(i) else {
                // Unterminated continuation: consume to end of input.
                text = strip_continuation(&text);
                break;
            };
            i += 1;
            if next.trim_start().starts_with('#') {
                // Comment lines inside a continuation are dropped.
                continue;
            }
            text = strip_continuation(&text);
            text.push(' ');
            text.push_str(next);
        }

        // Heredoc bodies are opaque: skip their lines, in declaration order.
        for delimiter in heredoc_delimiters(&text) {
            while let Some(&body) = lines.get(i) {
                i += 1;
                if body == delimiter {
                    break;
                }
            }
        }

        tokens.push(Token {
            kind: TokenKind::Instruction(text),
            line: start_line,
        });
    }

    tokens
}

fn ends_with_continuation(text: &str) -> bool {
    text.trim_end().ends_with('\\')
}

/// Remove the trailing continuation backslash and the whitespace around it.
fn strip_continuation(text: &str) -> String {
    let trimmed = text.trim_end();
    trimmed[..trimmed.len() - 1].trim_end().to_string()
}

/// Scan a joined instruction line for heredoc openers (`<<`, optional `-`,
/// optional quoting, delimiter word) and return the delimiters in order.
fn heredoc_delimiters(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut delimiters = Vec::new();
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] != b'<' || bytes[i + 1] != b'<' {
            i += 1;
            continue;
        }
        let mut j = i + 2;
        if j < bytes.len() && bytes[j] == b'-' {
            j += 1;
        }
        let quote = if j < bytes.len() && (bytes[j] == b'"' || bytes[j] == b'\'') {
            j += 1;
            Some(bytes[j - 1])
        } else {
            None
        };
        let start = j;
        while j < bytes.len() && is_delimiter_char(bytes[j]) {
            j += 1;
        }
        let end = j;
        if end > start {
            let closed = match quote {
                Some(q) => {
                    if j < bytes.len() && bytes[j] == q {
                        j += 1;
                        true
                    } else {
                        false
                    }
                }
                None => true,
            };
            if closed {
                delimiters.push(text[start..end].to_string());
                i = j;
                continue;
            }
        }
        i = j.max(i + 2);
    }

    delimiters
}

fn is_delimiter_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, b'_' | b'.' | b'-')
}

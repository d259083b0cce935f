//! Minimal shell-word splitting for instruction payloads.
//!
//! This is a deliberate simplification, not full shell grammar: words are
//! whitespace-separated, single and double quotes group text into one word,
//! and a backslash escapes the next character outside single quotes. Each word
//! is tagged with whether any part of it was quoted, which is all the lint
//! rules need. Unterminated quotes consume to the end of the input.

/// One word of an instruction payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// The word text with quotes removed and escapes processed.
    pub text: String,
    /// Whether any part of the word was quoted.
    pub quoted: bool,
}

impl Word {
    #[cfg(test)]
    pub fn bare(text: &str) -> Self {
        Self {
            text: text.to_string(),
            quoted: false,
        }
    }
}

/// Split a payload into shell words.
pub fn split_words(input: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let mut text = String::new();
        let mut quoted = false;

        while let Some(&ch) = chars.peek() {
            match ch {
                c if c.is_whitespace() => break,
                '"' => {
                    chars.next();
                    quoted = true;
                    while let Some(c) = chars.next() {
                        match c {
                            '"' => break,
                            '\\' => {
                                if let Some(escaped) = chars.next() {
                                    text.push(escaped);
                                }
                            }
                            _ => text.push(c),
                        }
                    }
                }
                '\'' => {
                    chars.next();
                    quoted = true;
                    for c in chars.by_ref() {
                        if c == '\'' {
                            break;
                        }
                        text.push(c);
                    }
                }
                '\\' => {
                    chars.next();
                    if let Some(escaped) = chars.next() {
                        text.push(escaped);
                    }
                }
                _ => {
                    chars.next();
                    text.push(ch);
                }
            }
        }

        words.push(Word { text, quoted });
    }

    words
}

/// Parse the Dockerfile JSON exec/copy form (`["a", "b"]`).
///
/// Returns `None` when the payload is not a JSON string array; callers fall
/// back to shell-word splitting.
pub fn parse_json_array(input: &str) -> Option<Vec<String>> {
    let trimmed = input.trim();
    if !trimmed.starts_with('[') {
        return None;
    }
    serde_json::from_str::<Vec<String>>(trimmed).ok()
}

//! Pattern Error Handling
//!
//! Every operation that takes a pattern fails with [`PatternError`] when the
//! pattern does not compile. The engine's own message is kept verbatim; on top
//! of it the error carries a coarse classification and, where one can be
//! derived, a hint for fixing the pattern.

use thiserror::Error;

/// An invalid or unsupported regular-expression pattern
#[derive(Debug, Clone, Error)]
#[error("invalid pattern \"{pattern}\": {message}")]
pub struct PatternError {
    pattern: String,
    kind: PatternErrorKind,
    message: String,
    suggestion: Option<String>,
    #[source]
    source: Option<regex::Error>,
}

/// Classification of a pattern failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternErrorKind {
    /// Group, character class or counted repetition left open
    UnclosedDelimiter {
        delimiter: char, // '(', '[', '{'
        position: Option<usize>,
    },
    /// Escape sequence the engine does not recognize
    InvalidEscape {
        sequence: String,
        position: Option<usize>,
    },
    /// Quantifier with nothing to repeat or a malformed repetition
    InvalidQuantifier { position: Option<usize> },
    /// Syntax the engine deliberately rejects (look-around, backreferences)
    Unsupported { feature: &'static str },
    /// Compiled program exceeds the configured size limit
    SizeLimit { limit: usize },
    /// Operation needs a capturing group but the pattern has none
    MissingCaptureGroup,
    /// Anything else the parser rejects
    Syntax,
}

impl PatternError {
    /// Wrap an engine error raised while compiling `pattern`
    pub fn from_regex_error(err: regex::Error, pattern: &str) -> Self {
        let message = err.to_string();
        let kind = classify(&err, pattern);
        let suggestion = suggest(&kind, pattern);

        Self {
            pattern: pattern.to_string(),
            kind,
            message,
            suggestion,
            source: Some(err),
        }
    }

    /// The pattern compiled fine but has no group for a group-only operation
    pub fn missing_capture_group(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            kind: PatternErrorKind::MissingCaptureGroup,
            message: "pattern has no capturing group".to_string(),
            suggestion: Some(format!(
                "Wrap the part you want returned in parentheses, e.g. \"({})\".",
                pattern
            )),
            source: None,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> &PatternErrorKind {
        &self.kind
    }

    /// The engine's message, unchanged
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Multi-line report with the classification and suggestion
    pub fn report(&self) -> String {
        let mut output = format!("Pattern Error\n  Pattern: \"{}\"\n", self.pattern);

        match &self.kind {
            PatternErrorKind::UnclosedDelimiter { delimiter, position } => {
                output.push_str("  Type: Unclosed delimiter\n");
                output.push_str(&format!(
                    "  Missing closing '{}' for opening '{}'{}\n",
                    closer_for(*delimiter),
                    delimiter,
                    at_position(*position)
                ));
            }
            PatternErrorKind::InvalidEscape { sequence, position } => {
                output.push_str("  Type: Invalid escape sequence\n");
                output.push_str(&format!("  Sequence: '{}'{}\n", sequence, at_position(*position)));
            }
            PatternErrorKind::InvalidQuantifier { position } => {
                output.push_str(&format!("  Type: Invalid quantifier{}\n", at_position(*position)));
            }
            PatternErrorKind::Unsupported { feature } => {
                output.push_str(&format!("  Type: Unsupported feature ({})\n", feature));
            }
            PatternErrorKind::SizeLimit { limit } => {
                output.push_str(&format!("  Type: Size limit exceeded ({} bytes)\n", limit));
            }
            PatternErrorKind::MissingCaptureGroup => {
                output.push_str("  Type: Missing capture group\n");
            }
            PatternErrorKind::Syntax => {
                output.push_str("  Type: Syntax error\n");
            }
        }
        output.push_str(&format!("  Details: {}\n", engine_reason(&self.message)));

        if let Some(ref suggestion) = self.suggestion {
            output.push_str(&format!("  Suggestion: {}\n", suggestion));
        }

        output
    }
}

/// The last `error: ...` line of a syntax error, or the whole message
fn engine_reason(message: &str) -> &str {
    message
        .rsplit("error: ")
        .next()
        .unwrap_or(message)
        .trim()
}

fn classify(err: &regex::Error, pattern: &str) -> PatternErrorKind {
    let message = match err {
        regex::Error::CompiledTooBig(limit) => {
            return PatternErrorKind::SizeLimit { limit: *limit };
        }
        regex::Error::Syntax(message) => message.as_str(),
        _ => return PatternErrorKind::Syntax,
    };

    // The rendered message echoes the pattern, so only look at the reason
    let reason = engine_reason(message).to_lowercase();

    if reason.contains("unclosed") {
        let delimiter = if reason.contains("character class") {
            Some(('[', ']'))
        } else if reason.contains("counted repetition") {
            Some(('{', '}'))
        } else if reason.contains("group") {
            Some(('(', ')'))
        } else {
            None
        };
        if let Some((open, close)) = delimiter {
            return PatternErrorKind::UnclosedDelimiter {
                delimiter: open,
                position: find_unclosed_delimiter(pattern, open, close),
            };
        }
    }

    if reason.contains("backreference") {
        return PatternErrorKind::Unsupported { feature: "backreferences" };
    }

    if reason.contains("look-around") || reason.contains("lookaround") {
        return PatternErrorKind::Unsupported { feature: "look-around" };
    }

    if reason.contains("escape") {
        let position = find_invalid_escape(pattern);
        return PatternErrorKind::InvalidEscape {
            sequence: position
                .map(|pos| extract_escape_at(pattern, pos))
                .unwrap_or_else(|| "\\".to_string()),
            position,
        };
    }

    if reason.contains("repetition") || reason.contains("quantifier") {
        return PatternErrorKind::InvalidQuantifier {
            position: find_invalid_quantifier(pattern),
        };
    }

    PatternErrorKind::Syntax
}

fn suggest(kind: &PatternErrorKind, pattern: &str) -> Option<String> {
    match kind {
        PatternErrorKind::UnclosedDelimiter { delimiter, position } => Some(format!(
            "Add a closing '{}' to match the opening '{}'{}, or escape it as '\\{}' for a literal.",
            closer_for(*delimiter),
            delimiter,
            at_position(*position),
            delimiter
        )),
        PatternErrorKind::InvalidEscape { sequence, .. } if sequence == "\\" => Some(
            "The pattern ends with a lone backslash. Use '\\\\' for a literal backslash."
                .to_string(),
        ),
        PatternErrorKind::InvalidEscape { sequence, .. } => Some(format!(
            "The escape sequence '{}' is not recognized. \
             Common escapes are \\n, \\t, \\d, \\w, \\s, \\b, \\xHH and \\u{{HHHH}}.",
            sequence
        )),
        PatternErrorKind::InvalidQuantifier { .. } => Some(
            "A quantifier (*, +, ?, {n,m}) has nothing to repeat. \
             Place it after a character or group, e.g. 'a*', '(foo)+', 'bar{3}'."
                .to_string(),
        ),
        PatternErrorKind::Unsupported { feature: "backreferences" } => Some(
            "Backreferences are not supported inside patterns. \
             Use $1, $2 or ${name} in the replacement instead."
                .to_string(),
        ),
        PatternErrorKind::Unsupported { .. } => Some(
            "Look-ahead and look-behind are not supported. \
             Capture the surrounding text with a group and use find_all_captures."
                .to_string(),
        ),
        PatternErrorKind::SizeLimit { limit } => Some(format!(
            "The compiled pattern exceeds {} bytes. Simplify large repetitions \
             or raise size_limit in the matching options.",
            limit
        )),
        PatternErrorKind::MissingCaptureGroup => None,
        PatternErrorKind::Syntax => {
            if pattern.contains('[') && !pattern.contains(']') {
                Some("Unclosed character class '[...]'. Add a closing ']'.".to_string())
            } else if pattern.contains(')') && !pattern.contains('(') {
                Some("Unopened group. Remove the ')' or escape it as '\\)'.".to_string())
            } else {
                Some("Check your regex syntax. Escape special characters \
                      . + * ? ^ $ | ( ) [ ] { } \\ when you mean them literally."
                    .to_string())
            }
        }
    }
}

fn closer_for(delimiter: char) -> char {
    match delimiter {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        _ => '?',
    }
}

fn at_position(position: Option<usize>) -> String {
    position
        .map(|pos| format!(" at position {}", pos))
        .unwrap_or_default()
}

/// Helper: Char position of the innermost opening delimiter left unclosed
fn find_unclosed_delimiter(pattern: &str, open: char, close: char) -> Option<usize> {
    let mut stack = Vec::new();
    let mut in_char_class = false;
    let mut chars = pattern.chars().enumerate();

    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
            continue;
        }

        // Parentheses and braces inside [...] are literals
        if open != '[' {
            if c == '[' {
                in_char_class = true;
                continue;
            }
            if c == ']' {
                in_char_class = false;
                continue;
            }
            if in_char_class {
                continue;
            }
        }

        if c == open {
            stack.push(i);
        } else if c == close {
            stack.pop();
        }
    }

    stack.last().copied()
}

/// Helper: Char position of the first escape the engine rejects
fn find_invalid_escape(pattern: &str) -> Option<usize> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' {
            i += 1;
            continue;
        }
        let Some(&next) = chars.get(i + 1) else {
            return Some(i);
        };

        let is_valid = match next {
            // Control characters
            'a' | 'f' | 't' | 'n' | 'r' | 'v' => true,
            // Hex and Unicode escapes
            'x' | 'u' | 'U' => true,
            // Perl classes, Unicode classes and assertions
            'd' | 'D' | 's' | 'S' | 'w' | 'W' | 'p' | 'P' => true,
            'b' | 'B' | 'A' | 'z' | '<' | '>' => true,
            // Any other ASCII punctuation is a literal escape
            c if c.is_ascii_punctuation() || c == ' ' => true,
            _ => false,
        };

        if !is_valid {
            return Some(i);
        }
        i += 2;
    }

    None
}

/// Helper: Extract the escape sequence at a given char position
fn extract_escape_at(pattern: &str, pos: usize) -> String {
    let mut rest = pattern.chars().skip(pos);
    match (rest.next(), rest.next()) {
        (Some('\\'), Some(c)) => format!("\\{}", c),
        (Some(c), _) => c.to_string(),
        (None, _) => String::new(),
    }
}

/// Helper: Char position of a quantifier with nothing before it
fn find_invalid_quantifier(pattern: &str) -> Option<usize> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                i += 2;
                continue;
            }
            '*' | '+' | '?' | '{' => {
                if i == 0 || chars[i - 1] == '(' || chars[i - 1] == '|' {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

//! Pattern Operations
//!
//! Stateless helpers over the `regex` crate. Each free function compiles its
//! pattern on every call and keeps nothing between calls; build a
//! [`Matcher`] once to reuse a compiled pattern or to apply [`MatchOptions`].
//!
//! Absence is data, not failure: no match yields an empty vector, `None`, or
//! the subject unchanged. The only error is [`PatternError`], for patterns the
//! engine rejects.

use regex::Regex;

use crate::config::MatchOptions;
use crate::regex_error::PatternError;

/// A compiled pattern
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile `pattern` with the engine defaults
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Self::with_options(pattern, &MatchOptions::default())
    }

    /// Compile `pattern` with explicit builder options
    pub fn with_options(pattern: &str, options: &MatchOptions) -> Result<Self, PatternError> {
        tracing::trace!(pattern, "compiling pattern");
        match options.build(pattern) {
            Ok(regex) => Ok(Self { regex }),
            Err(err) => {
                tracing::debug!(pattern, kind = ?err.kind(), "pattern rejected");
                Err(err)
            }
        }
    }

    /// The source pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Replace every non-overlapping match; `$1`, `${name}` and `$0` expand
    pub fn replace(&self, replacement: &str, text: &str) -> String {
        self.regex.replace_all(text, replacement).into_owned()
    }

    /// Replace only the leftmost match
    pub fn replace_first(&self, replacement: &str, text: &str) -> String {
        self.regex.replace(text, replacement).into_owned()
    }

    /// Full text of every non-overlapping match, left to right
    ///
    /// Capturing groups do not change the result; see
    /// [`find_all_captures`](Self::find_all_captures) for group-only results.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// First capture group of every match
    ///
    /// Matches in which the group did not participate are skipped.
    pub fn find_all_captures<'t>(&self, text: &'t str) -> Result<Vec<&'t str>, PatternError> {
        // captures_len counts the implicit whole-match group
        if self.regex.captures_len() < 2 {
            return Err(PatternError::missing_capture_group(self.as_str()));
        }

        Ok(self
            .regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect())
    }

    /// Leftmost match, or `None`
    pub fn find_first<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex.find(text).map(|m| m.as_str())
    }

    /// Whether a match starts at byte 0 of `text`
    ///
    /// This is neither a search anywhere nor a full-string match: `\d+`
    /// matches `"42 apples"` but not `"apples 42"`.
    pub fn is_match(&self, text: &str) -> bool {
        // Leftmost semantics: a match at 0 is always the one reported
        self.regex.find(text).is_some_and(|m| m.start() == 0)
    }

    /// Fragments between matches, keeping empty fragments at the edges
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.split(text).collect()
    }
}

/// Replace every non-overlapping match of `pattern` in `text`
///
/// # Examples
///
/// ```
/// assert_eq!(
///     patx::replace(r"(\w+)@(\w+)", "$2 at $1", "me@home").unwrap(),
///     "home at me"
/// );
/// ```
pub fn replace(pattern: &str, replacement: &str, text: &str) -> Result<String, PatternError> {
    Ok(Matcher::new(pattern)?.replace(replacement, text))
}

/// Replace the leftmost match of `pattern` in `text`
pub fn replace_first(pattern: &str, replacement: &str, text: &str) -> Result<String, PatternError> {
    Ok(Matcher::new(pattern)?.replace_first(replacement, text))
}

/// Every non-overlapping match of `pattern` in `text`, as full match text
///
/// # Examples
///
/// ```
/// assert_eq!(
///     patx::find_all("[A-Za-z]+", "123 apple 456 banana").unwrap(),
///     vec!["apple", "banana"]
/// );
/// ```
pub fn find_all<'t>(pattern: &str, text: &'t str) -> Result<Vec<&'t str>, PatternError> {
    Ok(Matcher::new(pattern)?.find_all(text))
}

/// First capture group of every match of `pattern` in `text`
pub fn find_all_captures<'t>(pattern: &str, text: &'t str) -> Result<Vec<&'t str>, PatternError> {
    Matcher::new(pattern)?.find_all_captures(text)
}

/// Leftmost match of `pattern` in `text`, or `None`
pub fn find_first<'t>(pattern: &str, text: &'t str) -> Result<Option<&'t str>, PatternError> {
    Ok(Matcher::new(pattern)?.find_first(text))
}

/// Whether `pattern` matches at the start of `text`
///
/// # Examples
///
/// ```
/// assert!(patx::is_match(r"\d+", "42 apples").unwrap());
/// assert!(!patx::is_match(r"\d+", "apples 42").unwrap());
/// ```
pub fn is_match(pattern: &str, text: &str) -> Result<bool, PatternError> {
    Ok(Matcher::new(pattern)?.is_match(text))
}

/// Split `text` at every match of `pattern`
///
/// # Examples
///
/// ```
/// assert_eq!(patx::split(",", "a,b,,c").unwrap(), vec!["a", "b", "", "c"]);
/// ```
pub fn split<'t>(pattern: &str, text: &'t str) -> Result<Vec<&'t str>, PatternError> {
    Ok(Matcher::new(pattern)?.split(text))
}

/// Escape `literal` so it matches itself when embedded in a pattern
pub fn escape(literal: &str) -> String {
    regex::escape(literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex_error::PatternErrorKind;

    #[test]
    fn test_replace() {
        // Only the matched word changes; surrounding text is left alone
        assert_eq!(
            replace("old", "new", "This is an old text.").unwrap(),
            "This is an new text."
        );
        assert_eq!(replace("o", "0", "foo boo").unwrap(), "f00 b00");
    }

    #[test]
    fn test_replace_no_match_returns_text() {
        assert_eq!(replace("xyz", "abc", "nothing here").unwrap(), "nothing here");
    }

    #[test]
    fn test_replace_expands_groups() {
        assert_eq!(
            replace(r"(\w+)=(\w+)", "$2=$1", "a=1 b=2").unwrap(),
            "1=a 2=b"
        );
        assert_eq!(
            replace(r"(?P<key>\w+):", "[${key}]", "x: y:").unwrap(),
            "[x] [y]"
        );
        assert_eq!(replace(r"\d+", "<$0>", "a1b22").unwrap(), "a<1>b<22>");
    }

    #[test]
    fn test_replace_first() {
        assert_eq!(replace_first("a", "b", "aaa").unwrap(), "baa");
        assert_eq!(replace_first("z", "b", "aaa").unwrap(), "aaa");
    }

    #[test]
    fn test_find_all() {
        assert_eq!(
            find_all("[A-Za-z]+", "123 apple 456 banana").unwrap(),
            vec!["apple", "banana"]
        );
        assert!(find_all(r"\d", "no digits").unwrap().is_empty());
    }

    #[test]
    fn test_find_all_returns_full_match_with_groups() {
        assert_eq!(
            find_all(r"(\w+)@example\.com", "ann@example.com, bob@example.com").unwrap(),
            vec!["ann@example.com", "bob@example.com"]
        );
    }

    #[test]
    fn test_find_all_captures() {
        assert_eq!(
            find_all_captures(r"(\w+)@example\.com", "ann@example.com, bob@example.com")
                .unwrap(),
            vec!["ann", "bob"]
        );
        // Non-participating group is skipped
        assert_eq!(find_all_captures(r"(a)|b", "ab").unwrap(), vec!["a"]);
    }

    #[test]
    fn test_find_all_captures_requires_group() {
        let err = find_all_captures(r"\w+", "abc").unwrap_err();
        assert_eq!(err.kind(), &PatternErrorKind::MissingCaptureGroup);
        // Non-capturing groups do not count
        assert!(find_all_captures(r"(?:a)+", "aa").is_err());
    }

    #[test]
    fn test_find_first() {
        assert_eq!(find_first(r"\d+", "ab 12 34").unwrap(), Some("12"));
        assert_eq!(find_first(r"\d+", "abc").unwrap(), None);
        // Empty match is still a match
        assert_eq!(find_first("x*", "abc").unwrap(), Some(""));
    }

    #[test]
    fn test_is_match_is_anchored_at_start() {
        assert!(is_match(r"\d+", "42 apples").unwrap());
        assert!(!is_match(r"\d+", "apples 42").unwrap());
        assert!(!is_match("abc", "xabc").unwrap());
        assert_eq!(find_first("abc", "xabc").unwrap(), Some("abc"));
        // Not a full match: trailing text is allowed
        assert!(is_match("ab", "abc").unwrap());
        assert!(is_match("", "anything").unwrap());
    }

    #[test]
    fn test_is_match_with_alternation() {
        // Leftmost-first picks "b" at 0 even though "ab" could match later
        assert!(is_match("ab|b", "bab").unwrap());
        assert!(!is_match("ab|c", "xab").unwrap());
    }

    #[test]
    fn test_split() {
        assert_eq!(split(",", "a,b,,c").unwrap(), vec!["a", "b", "", "c"]);
        assert_eq!(split(",", ",a,").unwrap(), vec!["", "a", ""]);
        assert_eq!(split(r"\s+", "one  two\tthree").unwrap(), vec!["one", "two", "three"]);
        assert_eq!(split(",", "abc").unwrap(), vec!["abc"]);
        assert_eq!(split(",", "").unwrap(), vec![""]);
    }

    #[test]
    fn test_invalid_pattern_fails_every_operation() {
        let bad = "(unclosed";
        assert!(replace(bad, "x", "text").is_err());
        assert!(replace_first(bad, "x", "text").is_err());
        assert!(find_all(bad, "text").is_err());
        assert!(find_all_captures(bad, "text").is_err());
        assert!(find_first(bad, "text").is_err());
        assert!(is_match(bad, "text").is_err());
        assert!(split(bad, "text").is_err());

        let err = find_first(bad, "text").unwrap_err();
        assert_eq!(err.pattern(), bad);
    }

    #[test]
    fn test_matcher_with_options() {
        let options = MatchOptions {
            case_insensitive: true,
            multi_line: true,
            ..MatchOptions::default()
        };
        let matcher = Matcher::with_options("^error", &options).unwrap();
        assert_eq!(matcher.find_all("ok\nERROR one\nerror two"), vec!["ERROR", "error"]);
        assert_eq!(matcher.as_str(), "^error");
    }

    #[test]
    fn test_escape() {
        let literal = "1+1=2 (probably)";
        let pattern = escape(literal);
        assert_eq!(find_first(&pattern, "so 1+1=2 (probably)!").unwrap(), Some(literal));
    }

    #[test]
    fn test_matcher_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matcher>();
    }
}

//! Literal Marker Extraction
//!
//! `find_before`, `find_after` and `find_between` cut a subject at literal
//! markers. Markers are plain substrings, never patterns, so these functions
//! cannot fail: when a marker is missing they return the subject unchanged.
//!
//! An empty marker occurs at offset 0 of any subject.

/// Text preceding the first occurrence of `marker`
///
/// # Examples
///
/// ```
/// use patx::find_before;
///
/// assert_eq!(find_before("key=value", "="), "key");
/// assert_eq!(find_before("no marker here", "="), "no marker here");
/// ```
pub fn find_before<'t>(text: &'t str, marker: &str) -> &'t str {
    match text.find(marker) {
        Some(start) => &text[..start],
        None => fallback(text, marker),
    }
}

/// Text following the first occurrence of `marker`
///
/// # Examples
///
/// ```
/// use patx::find_after;
///
/// assert_eq!(find_after("key=value", "="), "value");
/// assert_eq!(find_after("a=b=c", "="), "b=c");
/// ```
pub fn find_after<'t>(text: &'t str, marker: &str) -> &'t str {
    match text.find(marker) {
        Some(start) => &text[start + marker.len()..],
        None => fallback(text, marker),
    }
}

/// Text strictly between the first `start_marker` and the first `end_marker`
/// that follows it
///
/// If the first `end_marker` in `text` comes before the first
/// `start_marker`, the text is returned unchanged, even when another end
/// marker follows the start marker. Otherwise the end marker is searched for
/// after the start marker has ended, so the two never overlap.
///
/// # Examples
///
/// ```
/// use patx::find_between;
///
/// assert_eq!(find_between("<a>value</a>", "<a>", "</a>"), "value");
/// assert_eq!(find_between("</a> then <a>", "<a>", "</a>"), "</a> then <a>");
/// assert_eq!(find_between("</a>x<a>y</a>", "<a>", "</a>"), "</a>x<a>y</a>");
/// ```
pub fn find_between<'t>(text: &'t str, start_marker: &str, end_marker: &str) -> &'t str {
    let Some(start) = text.find(start_marker) else {
        return fallback(text, start_marker);
    };
    if text.find(end_marker).is_some_and(|end| end < start) {
        tracing::trace!(
            start_marker,
            end_marker,
            "end marker precedes start marker, returning text unchanged"
        );
        return text;
    }
    let body_start = start + start_marker.len();

    match text[body_start..].find(end_marker) {
        Some(len) => &text[body_start..body_start + len],
        None => fallback(text, end_marker),
    }
}

fn fallback<'t>(text: &'t str, marker: &str) -> &'t str {
    tracing::trace!(marker, "marker not found, returning text unchanged");
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_before() {
        assert_eq!(find_before("key=value", "="), "key");
        assert_eq!(find_before("=value", "="), "");
        assert_eq!(find_before("a=b=c", "="), "a");
        assert_eq!(find_before("key: value", ": "), "key");
    }

    #[test]
    fn test_find_after() {
        assert_eq!(find_after("key=value", "="), "value");
        assert_eq!(find_after("key=", "="), "");
        assert_eq!(find_after("key: value", ": "), "value");
    }

    #[test]
    fn test_find_between() {
        assert_eq!(find_between("<a>value</a>", "<a>", "</a>"), "value");
        assert_eq!(find_between("<a></a>", "<a>", "</a>"), "");
        assert_eq!(
            find_between("<a>one</a><a>two</a>", "<a>", "</a>"),
            "one"
        );
        assert_eq!(find_between("x[1] y[2]", "[", "]"), "1");
    }

    #[test]
    fn test_find_between_same_marker() {
        assert_eq!(find_between("say \"hi\" now", "\"", "\""), "hi");
        // End search starts after the start marker, so they never share bytes
        assert_eq!(find_between("--", "-", "-"), "");
        assert_eq!(find_between("-", "-", "-"), "-");
    }

    #[test]
    fn test_markers_are_literal() {
        assert_eq!(find_before("a.b*c", ".b*"), "a");
        assert_eq!(find_after("price: $5 (net)", "$"), "5 (net)");
        assert_eq!(find_between("f(x) + g(y)", "(", ")"), "x");
        assert_eq!(find_between("a\nb|c\nd", "\n", "\n"), "b|c");
    }

    #[test]
    fn test_missing_marker_returns_text() {
        assert_eq!(find_before("key value", "="), "key value");
        assert_eq!(find_after("key value", "="), "key value");
        assert_eq!(find_between("<a>value", "<a>", "</a>"), "<a>value");
        assert_eq!(find_between("value</a>", "<a>", "</a>"), "value</a>");
        assert_eq!(find_between("", "<a>", "</a>"), "");
    }

    #[test]
    fn test_end_before_start_returns_text() {
        let text = "</a>value<a>";
        assert_eq!(find_between(text, "<a>", "</a>"), text);

        // A later end marker does not rescue an earlier one
        let text = "</a>x<a>y</a>";
        assert_eq!(find_between(text, "<a>", "</a>"), text);
        assert_eq!(find_between("]a[b]", "[", "]"), "]a[b]");
    }

    #[test]
    fn test_end_marker_inside_start_marker() {
        // Same marker: first occurrences coincide, so the end is searched after the start
        assert_eq!(find_between("'a' 'b'", "'", "'"), "a");
        // End marker first occurs inside the start marker, not before it
        assert_eq!(find_between("<a>x</a>", "<a>", "a>"), "x</");
    }

    #[test]
    fn test_empty_markers() {
        assert_eq!(find_before("abc", ""), "");
        assert_eq!(find_after("abc", ""), "abc");
        assert_eq!(find_between("abc", "", ""), "");
        assert_eq!(find_between("abc", "", "c"), "ab");
        assert_eq!(find_between("abc", "a", ""), "");
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(find_before("héllo→wörld", "→"), "héllo");
        assert_eq!(find_after("héllo→wörld", "→"), "wörld");
        assert_eq!(find_between("«ünï»", "«", "»"), "ünï");
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

// @const: Tag run before the first quote, e.g. `narrator @ happy "`
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*([a-zA-Z][\w\s@]*)\s+""#).unwrap()
});

/// Speaker tag preceding the first quote, trimmed.
///
/// Works on a code line (`e happy "..."`) as well as on comment content with
/// the `#` already stripped. Tags compare by plain string equality.
pub fn match_tag(text: &str) -> Option<&str> {
    TAG_REGEX
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|tag| tag.as_str().trim())
}

use once_cell::sync::Lazy;
use regex::Regex;

// @module: Line shape predicates for the script dialect

// @const: Optional tag followed by an opening quote
static CODE_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(?:[a-zA-Z][\w\s@]*\s+)?""#).unwrap()
});

// @const: Localization block header prefix
const BLOCK_BOUNDARY_PREFIX: &str = "translate ";

/// Engine cue keywords whose lines are never dialogue
pub const DEFAULT_DIRECTIVE_KEYWORDS: &[&str] = &["voice", "video", "play", "queue"];

/// Comment prefixes that mark resource paths rather than source text
pub const DEFAULT_METADATA_PREFIXES: &[&str] = &["game/", "renpy/"];

/// Shape of one trimmed line, as seen by the extraction loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Old,
    New,
    Comment,
    BlockBoundary,
    Code,
    Other,
}

fn starts_with_keyword(trimmed: &str, keyword: &str) -> bool {
    trimmed
        .strip_prefix(keyword)
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}

pub fn is_old_line(trimmed: &str) -> bool {
    starts_with_keyword(trimmed, "old")
}

pub fn is_new_line(trimmed: &str) -> bool {
    starts_with_keyword(trimmed, "new")
}

pub fn is_comment_line(trimmed: &str) -> bool {
    trimmed.trim_start().starts_with('#')
}

/// A `translate <label>:` header. Nothing may pair across it.
pub fn is_block_boundary(trimmed: &str) -> bool {
    trimmed.starts_with(BLOCK_BOUNDARY_PREFIX)
}

/// `tag "..."` or `"..."` shape, ignoring whether the tag is a directive
pub fn has_code_shape(trimmed: &str) -> bool {
    CODE_LINE_REGEX.is_match(trimmed)
}

/// Comment body after the leading `#`, left-trimmed
pub fn comment_content(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix('#').map(str::trim_start)
}

/// Classifies lines, knowing which cue keywords to treat as directives
#[derive(Debug, Clone)]
pub struct LineClassifier {
    directive_keywords: Vec<String>,
}

impl LineClassifier {
    pub fn new<I, S>(directive_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            directive_keywords: directive_keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// First word of the line is a known cue keyword (`voice "v.ogg"`)
    pub fn is_directive(&self, trimmed: &str) -> bool {
        let first_word = trimmed.split_whitespace().next().unwrap_or("");
        self.directive_keywords.iter().any(|keyword| keyword == first_word)
    }

    /// A line that can hold the in-game string paired with a comment
    pub fn is_code_candidate(&self, trimmed: &str) -> bool {
        has_code_shape(trimmed) && !self.is_directive(trimmed)
    }

    pub fn classify(&self, trimmed: &str) -> LineKind {
        if is_old_line(trimmed) {
            LineKind::Old
        } else if is_new_line(trimmed) {
            LineKind::New
        } else if is_comment_line(trimmed) {
            LineKind::Comment
        } else if is_block_boundary(trimmed) {
            LineKind::BlockBoundary
        } else if self.is_code_candidate(trimmed) {
            LineKind::Code
        } else {
            LineKind::Other
        }
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTIVE_KEYWORDS.iter().copied())
    }
}

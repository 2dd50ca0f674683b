use serde::{Deserialize, Serialize};
use std::fmt;

// @module: Records produced by script extraction

/// Layout a translatable pair was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractionFormat {
    /// `old "..."` followed by `new "..."`
    #[serde(rename = "old_new")]
    OldNew,
    /// `# tag "..."` followed by `tag "..."`
    #[serde(rename = "comment_tag")]
    CommentTagged,
    /// `# "..."` followed by `"..."`
    #[serde(rename = "comment_no_tag")]
    CommentPlain,
}

impl ExtractionFormat {
    // @returns: Stable identifier used in cache files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OldNew => "old_new",
            Self::CommentTagged => "comment_tag",
            Self::CommentPlain => "comment_no_tag",
        }
    }

    // @checks: Whether records of this layout carry a dialogue tag
    pub fn carries_tag(&self) -> bool {
        match self {
            Self::OldNew | Self::CommentPlain => false,
            Self::CommentTagged => true,
        }
    }
}

impl fmt::Display for ExtractionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// @struct: One raw line of a script, addressed by its 0-based index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine<'a> {
    // @field: 0-based line index
    pub index: usize,

    // @field: Untrimmed line content
    pub text: &'a str,
}

/// One translatable pair plus the line that must be rewritten later
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Original-language text (from the `old` line or the comment)
    pub source_text: String,

    /// Text currently on the code line, to be replaced by a translation
    pub translated_text: String,

    /// Index of the code line (or `new` line) to rewrite
    pub target_line_index: usize,

    /// Layout the pair was found in
    pub format: ExtractionFormat,

    /// Dialogue tag, only for `CommentTagged`
    pub tag: Option<String>,
}

/// Shapes the parser skipped that a caller may want to hear about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An `old` line with a quoted span whose `new` line never came
    UnmatchedOld {
        line_index: usize,
    },
    /// A comment and its code line both carry tags, but different ones
    TagMismatch {
        comment_line_index: usize,
        code_line_index: usize,
        comment_tag: String,
        code_tag: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedOld { line_index } => {
                write!(f, "'old' line {} has no matching 'new' line", line_index + 1)
            }
            Self::TagMismatch { comment_line_index, code_line_index, comment_tag, code_tag } => write!(
                f,
                "comment line {} tag '{}' does not match line {} tag '{}'",
                comment_line_index + 1,
                comment_tag,
                code_line_index + 1,
                code_tag
            ),
        }
    }
}

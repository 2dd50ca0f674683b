/*!
 * Entry assembly: the single forward pass over a script.
 *
 * Three layouts are recognized inside a localization block:
 *
 * - `old "..."` followed by `new "..."` (string tables)
 * - `# tag "..."` followed by `tag "..."`, possibly with cue lines between
 * - `# "..."` followed by `"..."`
 *
 * Parsing is total. Any line that does not complete one of these layouts is
 * skipped without producing an entry.
 */

use log::trace;

use super::classify::{
    comment_content, is_block_boundary, is_comment_line, is_new_line, is_old_line, LineClassifier,
    LineKind, DEFAULT_DIRECTIVE_KEYWORDS, DEFAULT_METADATA_PREFIXES,
};
use super::lookahead::find_next_code_line;
use super::model::{Diagnostic, Entry, ExtractionFormat};
use super::quoted::extract_quoted;
use super::tag::match_tag;

/// Knobs for the few dialect details that vary between projects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Comment prefixes that introduce resource paths, never source text
    pub metadata_prefixes: Vec<String>,

    /// Cue keywords stepped over by lookahead
    pub directive_keywords: Vec<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            metadata_prefixes: DEFAULT_METADATA_PREFIXES.iter().map(|p| p.to_string()).collect(),
            directive_keywords: DEFAULT_DIRECTIVE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

// Loop state: forward-only position plus entries in document order
#[derive(Debug, Default)]
struct ParseCursor {
    index: usize,
    entries: Vec<Entry>,
}

impl ParseCursor {
    fn emit(&mut self, entry: Entry, line_count: usize) {
        debug_assert!(entry.target_line_index < line_count);
        debug_assert!(entry.format.carries_tag() == entry.tag.is_some());
        trace!(
            "Entry at line {} ({}): {:?}",
            entry.target_line_index + 1,
            entry.format,
            entry.source_text
        );
        self.entries.push(entry);
    }
}

/// Extracts translatable entries from decoded script lines
#[derive(Debug, Clone)]
pub struct ScriptParser {
    metadata_prefixes: Vec<String>,
    classifier: LineClassifier,
}

impl ScriptParser {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            classifier: LineClassifier::new(options.directive_keywords),
            metadata_prefixes: options.metadata_prefixes,
        }
    }

    /// Parse silently, dropping unmatched shapes
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Entry> {
        self.parse_with_diagnostics(lines, |_| {})
    }

    /// Parse, reporting skipped shapes to `sink`. The entries are the same
    /// as with [`ScriptParser::parse`].
    pub fn parse_with_diagnostics<S, F>(&self, lines: &[S], mut sink: F) -> Vec<Entry>
    where
        S: AsRef<str>,
        F: FnMut(Diagnostic),
    {
        let mut cursor = ParseCursor::default();

        while cursor.index < lines.len() {
            let trimmed = lines[cursor.index].as_ref().trim();
            match self.classifier.classify(trimmed) {
                LineKind::Old => self.take_old_new(lines, &mut cursor, &mut sink),
                LineKind::Comment => self.take_comment_pair(lines, &mut cursor, &mut sink),
                LineKind::New | LineKind::BlockBoundary | LineKind::Code | LineKind::Other => {
                    cursor.index += 1;
                }
            }
        }

        cursor.entries
    }

    fn is_metadata_comment(&self, content: &str) -> bool {
        self.metadata_prefixes.iter().any(|prefix| content.starts_with(prefix.as_str()))
    }

    // `old "..."` then the next `new "..."` before any other pairing shape
    fn take_old_new<S, F>(&self, lines: &[S], cursor: &mut ParseCursor, sink: &mut F)
    where
        S: AsRef<str>,
        F: FnMut(Diagnostic),
    {
        let old_index = cursor.index;
        cursor.index += 1;

        let Some(source) = extract_quoted(lines[old_index].as_ref()) else {
            return;
        };

        for (index, line) in lines.iter().enumerate().skip(old_index + 1) {
            let text = line.as_ref();
            let trimmed = text.trim();

            if is_new_line(trimmed) {
                if let Some(translated) = extract_quoted(text) {
                    cursor.emit(
                        Entry {
                            source_text: source.to_string(),
                            translated_text: translated.to_string(),
                            target_line_index: index,
                            format: ExtractionFormat::OldNew,
                            tag: None,
                        },
                        lines.len(),
                    );
                    cursor.index = index + 1;
                    return;
                }
            } else if is_old_line(trimmed)
                || is_comment_line(trimmed)
                || is_block_boundary(trimmed)
                || self.classifier.is_code_candidate(trimmed)
            {
                break;
            }
        }

        sink(Diagnostic::UnmatchedOld { line_index: old_index });
    }

    // `# [tag] "..."` then the next code line in the same block
    fn take_comment_pair<S, F>(&self, lines: &[S], cursor: &mut ParseCursor, sink: &mut F)
    where
        S: AsRef<str>,
        F: FnMut(Diagnostic),
    {
        let comment_index = cursor.index;
        cursor.index += 1;

        let Some(content) = comment_content(lines[comment_index].as_ref()) else {
            return;
        };
        if self.is_metadata_comment(content) {
            return;
        }

        let Some(code) = find_next_code_line(lines, comment_index + 1, &self.classifier) else {
            return;
        };
        let (Some(source), Some(translated)) = (extract_quoted(content), extract_quoted(code.text))
        else {
            return;
        };

        let code_trimmed = code.text.trim();
        let (format, tag) = match (match_tag(content), match_tag(code_trimmed)) {
            (Some(comment_tag), Some(code_tag)) if comment_tag == code_tag => {
                (ExtractionFormat::CommentTagged, Some(code_tag.to_string()))
            }
            (Some(comment_tag), Some(code_tag)) => {
                sink(Diagnostic::TagMismatch {
                    comment_line_index: comment_index,
                    code_line_index: code.index,
                    comment_tag: comment_tag.to_string(),
                    code_tag: code_tag.to_string(),
                });
                return;
            }
            (None, None) if content.starts_with('"') && code_trimmed.starts_with('"') => {
                (ExtractionFormat::CommentPlain, None)
            }
            _ => return,
        };

        cursor.emit(
            Entry {
                source_text: source.to_string(),
                translated_text: translated.to_string(),
                target_line_index: code.index,
                format,
                tag,
            },
            lines.len(),
        );
        cursor.index = code.index + 1;
    }
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

/// Parse with default options
pub fn extract_entries<S: AsRef<str>>(lines: &[S]) -> Vec<Entry> {
    ScriptParser::default().parse(lines)
}

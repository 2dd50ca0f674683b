use super::classify::{LineClassifier, LineKind};
use super::model::ScriptLine;

/// First code-candidate line at or after `start`.
///
/// Blank lines, comments and cue directives (`voice`, `video`, ...) are
/// stepped over. Reaching a `translate ` header, an `old`/`new` line or the
/// end of input yields `None`.
pub fn find_next_code_line<'a, S: AsRef<str>>(
    lines: &'a [S],
    start: usize,
    classifier: &LineClassifier,
) -> Option<ScriptLine<'a>> {
    debug_assert!(start <= lines.len(), "lookahead start {} past end {}", start, lines.len());

    for (index, line) in lines.iter().enumerate().skip(start) {
        let text = line.as_ref();
        match classifier.classify(text.trim()) {
            LineKind::Code => return Some(ScriptLine { index, text }),
            // String table entries belong to their own pairs
            LineKind::BlockBoundary | LineKind::Old | LineKind::New => return None,
            LineKind::Comment | LineKind::Other => {}
        }
    }

    None
}

use crate::errors::ScriptError;

use super::quoted::rewrite_line;

/// Copy of `lines` with the quoted span of each target line replaced.
///
/// Lines that are not targeted come back unchanged. The replacement text is
/// inserted verbatim, the same way extraction reads it.
pub fn apply_translations<I, T>(lines: &[String], rewrites: I) -> Result<Vec<String>, ScriptError>
where
    I: IntoIterator<Item = (usize, T)>,
    T: AsRef<str>,
{
    let mut output = lines.to_vec();

    for (index, replacement) in rewrites {
        let line = output.get(index).ok_or(ScriptError::TargetLineOutOfRange {
            index,
            len: lines.len(),
        })?;
        let rewritten = rewrite_line(line, replacement.as_ref())
            .ok_or(ScriptError::MissingQuotedSpan { index })?;
        output[index] = rewritten;
    }

    Ok(output)
}

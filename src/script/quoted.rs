// @module: Quoted span extraction

/// Text strictly between the first and the last `"` of a line.
///
/// Interior quotes are kept verbatim; escapes are not interpreted, so
/// `"say \"hi\""` yields `say \"hi\"`. Returns `None` when the line has no
/// quote or only a single one.
pub fn extract_quoted(line: &str) -> Option<&str> {
    let first = line.find('"')?;
    let last = line.rfind('"')?;
    if last == first {
        return None;
    }
    Some(&line[first + 1..last])
}

/// Replace the quoted span of `line` with `replacement`, keeping everything
/// outside the outermost quotes untouched.
pub fn rewrite_line(line: &str, replacement: &str) -> Option<String> {
    let first = line.find('"')?;
    let last = line.rfind('"')?;
    if last == first {
        return None;
    }

    let mut rewritten = String::with_capacity(line.len() + replacement.len());
    rewritten.push_str(&line[..=first]);
    rewritten.push_str(replacement);
    rewritten.push_str(&line[last..]);
    Some(rewritten)
}

// @module: Decoded script text split into lines

// @const: Byte order mark some editors put at the start of scripts
const BOM: char = '\u{feff}';

/// A decoded script, kept line by line so rewrites touch only target lines.
///
/// Each line remembers its own terminator, and a leading BOM is remembered
/// too, so rendering the unchanged lines gives back the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDocument {
    /// Lines without their terminators
    pub lines: Vec<String>,

    /// Name of the encoding the text was decoded from
    pub encoding: String,

    // Terminator of each line: "\r\n", "\n", or "" for a last unterminated line
    endings: Vec<&'static str>,

    has_bom: bool,
}

impl ScriptDocument {
    /// Split decoded text. A leading BOM is kept out of the first line.
    pub fn from_text(text: &str, encoding: &str) -> Self {
        let has_bom = text.starts_with(BOM);
        let text = text.strip_prefix(BOM).unwrap_or(text);

        let mut lines = Vec::new();
        let mut endings = Vec::new();
        for piece in text.split_inclusive('\n') {
            let (line, ending) = if let Some(line) = piece.strip_suffix("\r\n") {
                (line, "\r\n")
            } else if let Some(line) = piece.strip_suffix('\n') {
                (line, "\n")
            } else {
                (piece, "")
            };
            lines.push(line.to_string());
            endings.push(ending);
        }

        Self {
            lines,
            encoding: encoding.to_string(),
            endings,
            has_bom,
        }
    }

    /// Join `lines` back, each with the terminator its line had on input.
    ///
    /// `lines` is expected to be this document's lines or a rewrite of them;
    /// lines past the original count get `"\n"`.
    pub fn render(&self, lines: &[String]) -> String {
        let capacity = lines.iter().map(|line| line.len() + 2).sum::<usize>() + BOM.len_utf8();
        let mut text = String::with_capacity(capacity);
        if self.has_bom {
            text.push(BOM);
        }

        for (index, line) in lines.iter().enumerate() {
            text.push_str(line);
            let ending = match self.endings.get(index) {
                Some(ending) => *ending,
                None => "\n",
            };
            text.push_str(ending);
        }
        text
    }

    /// Terminator of line `index`, if the line exists
    pub fn line_ending(&self, index: usize) -> Option<&'static str> {
        self.endings.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

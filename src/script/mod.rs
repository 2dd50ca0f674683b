/*!
 * Script extraction for visual-novel translation files.
 *
 * This module turns decoded `.rpy` translation scripts into [`Entry`] records
 * and writes translations back into the lines those records point at:
 *
 * - `quoted`: quoted span extraction and replacement
 * - `classify`: line shape predicates
 * - `tag`: speaker tag matching
 * - `lookahead`: bounded forward scan for the next code line
 * - `parser`: the single-pass entry assembler
 * - `document`: decoded text split into lines
 * - `writer`: rewriting target lines
 */

pub mod classify;
pub mod document;
pub mod lookahead;
pub mod model;
pub mod parser;
pub mod quoted;
pub mod tag;
pub mod writer;

// Re-export main types for easier usage
pub use self::document::ScriptDocument;
pub use self::model::{Diagnostic, Entry, ExtractionFormat, ScriptLine};
pub use self::parser::{extract_entries, ParserOptions, ScriptParser};
pub use self::quoted::{extract_quoted, rewrite_line};
pub use self::writer::apply_translations;

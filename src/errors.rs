/*!
 * Error types for the vnscript application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Extraction itself never fails: malformed script lines simply yield no entry.
 * The errors below come from the layers around it (rewriting, translation, I/O).
 */

use thiserror::Error;

/// Errors that can occur when rewriting script lines
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// A record points past the end of the document
    #[error("Target line {index} is out of range (document has {len} lines)")]
    TargetLineOutOfRange {
        /// Requested line index
        index: usize,
        /// Number of lines in the document
        len: usize,
    },

    /// The target line no longer carries a quoted span to overwrite
    #[error("Line {index} has no quoted text to replace")]
    MissingQuotedSpan {
        /// Line index
        index: usize,
    },
}

/// Errors that can occur during translation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// The translator has no result for this text
    #[error("No translation available for: {0}")]
    NotFound(String),

    /// The translator failed for another reason
    #[error("Translator failed: {0}")]
    Failed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from script rewriting
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::File(format!("JSON error: {}", error))
    }
}

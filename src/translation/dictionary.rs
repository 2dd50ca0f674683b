use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use log::debug;

use crate::errors::TranslationError;

use super::Translator;

/// Translator backed by an exact-match lookup table
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Parse a JSON object of `"source": "translation"` pairs
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, String> =
            serde_json::from_str(json).context("Dictionary must be a JSON object of strings")?;
        Ok(Self::new(entries))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read dictionary: {:?}", path.as_ref()))?;
        let dictionary = Self::from_json(&json)?;
        debug!("Loaded {} dictionary entries from {:?}", dictionary.len(), path.as_ref());
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl Translator for Dictionary {
    fn name(&self) -> &str {
        "dictionary"
    }

    fn is_rate_limited(&self) -> bool {
        false
    }

    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        self.entries
            .get(text)
            .cloned()
            .ok_or_else(|| TranslationError::NotFound(text.to_string()))
    }
}

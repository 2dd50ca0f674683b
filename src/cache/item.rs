use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::script::{Entry, ExtractionFormat};

use super::tokens::TokenCounter;

// @module: Per-entry translation records shared between workers

/// Translation progress of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TranslationStatus {
    #[default]
    Untranslated,
    Translated,
    Translating,
    Excluded,
}

impl From<TranslationStatus> for u8 {
    fn from(status: TranslationStatus) -> Self {
        match status {
            TranslationStatus::Untranslated => 0,
            TranslationStatus::Translated => 1,
            TranslationStatus::Translating => 2,
            TranslationStatus::Excluded => 7,
        }
    }
}

impl TryFrom<u8> for TranslationStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Untranslated),
            1 => Ok(Self::Translated),
            2 => Ok(Self::Translating),
            7 => Ok(Self::Excluded),
            other => Err(format!("Unknown translation status: {}", other)),
        }
    }
}

/// Where in the script a record came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptExtra {
    /// Line to rewrite with the translation
    pub target_line_index: usize,
    /// Layout the pair was found in
    pub format: ExtractionFormat,
    /// Dialogue tag, if any
    #[serde(default)]
    pub tag: Option<String>,
}

/// Plain copy of a record's fields, used for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheItemData {
    #[serde(default)]
    pub row_index: usize,
    #[serde(default)]
    pub text_index: usize,
    #[serde(default)]
    pub translation_status: TranslationStatus,
    #[serde(default)]
    pub model: String,
    pub source_text: String,
    pub translated_text: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub storage_path: String,
    pub extra: ScriptExtra,
}

/// A translation record whose fields are read and written under one lock
pub struct CacheItem {
    data: Mutex<CacheItemData>,
}

impl CacheItem {
    pub fn new(data: CacheItemData) -> Self {
        Self { data: Mutex::new(data) }
    }

    /// Record for an extracted entry; `text_index` is its position in the file
    pub fn from_entry(entry: Entry, text_index: usize) -> Self {
        Self::new(CacheItemData {
            row_index: entry.target_line_index,
            text_index,
            translation_status: TranslationStatus::Untranslated,
            model: String::new(),
            source_text: entry.source_text,
            translated_text: entry.translated_text,
            file_name: String::new(),
            storage_path: String::new(),
            extra: ScriptExtra {
                target_line_index: entry.target_line_index,
                format: entry.format,
                tag: entry.tag,
            },
        })
    }

    /// Copy of all fields taken under the lock
    pub fn snapshot(&self) -> CacheItemData {
        self.data.lock().clone()
    }

    pub fn row_index(&self) -> usize {
        self.data.lock().row_index
    }

    pub fn set_row_index(&self, row_index: usize) {
        self.data.lock().row_index = row_index;
    }

    pub fn text_index(&self) -> usize {
        self.data.lock().text_index
    }

    pub fn set_text_index(&self, text_index: usize) {
        self.data.lock().text_index = text_index;
    }

    pub fn translation_status(&self) -> TranslationStatus {
        self.data.lock().translation_status
    }

    pub fn set_translation_status(&self, status: TranslationStatus) {
        self.data.lock().translation_status = status;
    }

    pub fn model(&self) -> String {
        self.data.lock().model.clone()
    }

    pub fn set_model(&self, model: &str) {
        self.data.lock().model = model.to_string();
    }

    pub fn source_text(&self) -> String {
        self.data.lock().source_text.clone()
    }

    pub fn set_source_text(&self, source_text: &str) {
        self.data.lock().source_text = source_text.to_string();
    }

    pub fn translated_text(&self) -> String {
        self.data.lock().translated_text.clone()
    }

    pub fn set_translated_text(&self, translated_text: &str) {
        self.data.lock().translated_text = translated_text.to_string();
    }

    pub fn file_name(&self) -> String {
        self.data.lock().file_name.clone()
    }

    pub fn set_file_name(&self, file_name: &str) {
        self.data.lock().file_name = file_name.to_string();
    }

    pub fn storage_path(&self) -> String {
        self.data.lock().storage_path.clone()
    }

    pub fn set_storage_path(&self, storage_path: &str) {
        self.data.lock().storage_path = storage_path.to_string();
    }

    pub fn extra(&self) -> ScriptExtra {
        self.data.lock().extra.clone()
    }

    pub fn target_line_index(&self) -> usize {
        self.data.lock().extra.target_line_index
    }

    /// Memoized token count of the source text
    pub fn token_count(&self, counter: &TokenCounter) -> usize {
        let source_text = self.source_text();
        counter.count(&source_text)
    }

    /// Mark translated in one step so readers never see a half-updated record
    pub fn complete(&self, translated_text: &str, model: &str) {
        let mut data = self.data.lock();
        data.translated_text = translated_text.to_string();
        data.model = model.to_string();
        data.translation_status = TranslationStatus::Translated;
    }
}

impl From<CacheItemData> for CacheItem {
    fn from(data: CacheItemData) -> Self {
        Self::new(data)
    }
}

impl fmt::Debug for CacheItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CacheItem").field(&*self.data.lock()).finish()
    }
}

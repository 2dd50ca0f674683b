use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::script::Entry;

use super::item::{CacheItem, CacheItemData, TranslationStatus};

// @module: Records of one script file

/// All records extracted from one script file
#[derive(Debug, Clone)]
pub struct CacheFile {
    /// Path of the script, relative to the scanned root
    pub storage_path: String,

    /// Encoding the script was decoded with
    pub encoding: String,

    /// Records in document order
    pub items: Vec<Arc<CacheItem>>,
}

// Serialized form
#[derive(Debug, Serialize, Deserialize)]
struct CacheFileData {
    storage_path: String,
    encoding: String,
    items: Vec<CacheItemData>,
}

impl CacheFile {
    /// Wrap extracted entries into records, stamping each with its file
    pub fn from_entries(storage_path: &str, encoding: &str, entries: Vec<Entry>) -> Self {
        let file_name = Path::new(storage_path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let items = entries
            .into_iter()
            .enumerate()
            .map(|(text_index, entry)| {
                let item = CacheItem::from_entry(entry, text_index);
                item.set_file_name(&file_name);
                item.set_storage_path(storage_path);
                Arc::new(item)
            })
            .collect();

        Self {
            storage_path: storage_path.to_string(),
            encoding: encoding.to_string(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of records with the given status
    pub fn count_status(&self, status: TranslationStatus) -> usize {
        self.items.iter().filter(|item| item.translation_status() == status).count()
    }

    /// (target line, translated text) for every translated record
    pub fn rewrites(&self) -> Vec<(usize, String)> {
        self.items
            .iter()
            .map(|item| item.snapshot())
            .filter(|data| data.translation_status == TranslationStatus::Translated)
            .map(|data| (data.extra.target_line_index, data.translated_text))
            .collect()
    }

    pub fn to_json(files: &[CacheFile]) -> Result<String> {
        let data: Vec<CacheFileData> = files
            .iter()
            .map(|file| CacheFileData {
                storage_path: file.storage_path.clone(),
                encoding: file.encoding.clone(),
                items: file.items.iter().map(|item| item.snapshot()).collect(),
            })
            .collect();
        serde_json::to_string_pretty(&data).context("Failed to serialize cache files")
    }

    pub fn from_json(json: &str) -> Result<Vec<CacheFile>> {
        let data: Vec<CacheFileData> =
            serde_json::from_str(json).context("Failed to parse cache files")?;
        Ok(data
            .into_iter()
            .map(|file| CacheFile {
                storage_path: file.storage_path,
                encoding: file.encoding,
                items: file.items.into_iter().map(|item| Arc::new(CacheItem::new(item))).collect(),
            })
            .collect())
    }
}

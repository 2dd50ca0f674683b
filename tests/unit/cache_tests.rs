/*!
 * Tests for translation records and token accounting
 */

use std::sync::Arc;
use std::thread;

use vnscript::cache::{estimate_tokens, CacheFile, CacheItem, TokenCounter, TranslationStatus};
use vnscript::script::{extract_entries, ExtractionFormat};
use crate::common;

fn sample_file() -> CacheFile {
    let entries = extract_entries(&common::lines(common::SAMPLE_SCRIPT));
    CacheFile::from_entries("tl/french/script.rpy", "utf-8", entries)
}

/// Test that records carry their entry and file
#[test]
fn test_fromEntries_withSampleScript_shouldStampFileAndOrder() {
    let file = sample_file();
    assert_eq!(file.len(), 5);

    for (position, item) in file.items.iter().enumerate() {
        let data = item.snapshot();
        assert_eq!(data.text_index, position);
        assert_eq!(data.row_index, data.extra.target_line_index);
        assert_eq!(data.file_name, "script.rpy");
        assert_eq!(data.storage_path, "tl/french/script.rpy");
        assert_eq!(data.translation_status, TranslationStatus::Untranslated);
    }

    let extra = file.items[1].extra();
    assert_eq!(extra.format, ExtractionFormat::CommentTagged);
    assert_eq!(extra.tag.as_deref(), Some("e happy"));
}

/// Test that only translated records are rewritten
#[test]
fn test_rewrites_withMixedStatuses_shouldListTranslatedOnly() {
    let file = sample_file();
    file.items[0].complete("Bienvenue !", "dictionary");
    file.items[3].set_translation_status(TranslationStatus::Translating);

    assert_eq!(file.rewrites(), vec![(6, "Bienvenue !".to_string())]);
    assert_eq!(file.count_status(TranslationStatus::Translated), 1);
    assert_eq!(file.count_status(TranslationStatus::Untranslated), 3);
}

/// Test that saved JSON loads back with statuses intact
#[test]
fn test_toJson_thenFromJson_shouldPreserveRecords() {
    let file = sample_file();
    file.items[2].complete("Le soleil se couchait.", "dictionary");

    let json = CacheFile::to_json(std::slice::from_ref(&file)).unwrap();
    assert!(json.contains("\"translation_status\": 1"));
    assert!(json.contains("\"format\": \"comment_no_tag\""));

    let loaded = CacheFile::from_json(&json).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].storage_path, file.storage_path);
    assert_eq!(loaded[0].rewrites(), file.rewrites());
}

/// Test the token estimate
#[test]
fn test_estimateTokens_shouldRoundUpQuarterChars() {
    assert_eq!(estimate_tokens(""), 0);
    assert_eq!(estimate_tokens("abcd"), 1);
    assert_eq!(estimate_tokens("abcde"), 2);
    assert_eq!(estimate_tokens("éééé"), 1);
}

/// Test memo hits through records
#[test]
fn test_tokenCount_withSharedCounter_shouldMemoize() {
    let counter = TokenCounter::new();
    let file = sample_file();

    for item in &file.items {
        item.token_count(&counter);
    }
    assert_eq!(counter.stats(), (0, 5));

    file.items[0].token_count(&counter);
    assert_eq!(counter.stats(), (1, 5));
    assert_eq!(counter.len(), 5);
}

/// Test concurrent updates through shared records
#[test]
fn test_cacheItem_withConcurrentWriters_shouldStayConsistent() {
    let file = sample_file();
    let item: Arc<CacheItem> = file.items[0].clone();

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let item = item.clone();
            thread::spawn(move || item.complete(&format!("text {}", n), &format!("model {}", n)))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let data = item.snapshot();
    assert_eq!(data.translation_status, TranslationStatus::Translated);
    assert_eq!(data.translated_text.trim_start_matches("text "), data.model.trim_start_matches("model "));
}

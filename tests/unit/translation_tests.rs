/*!
 * Tests for the translator seam, rate limiting and dispatch
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use vnscript::cache::{CacheFile, TokenCounter, TranslationStatus};
use vnscript::errors::TranslationError;
use vnscript::script::extract_entries;
use vnscript::translation::{num_tokens_from_messages, Dictionary, Dispatcher, RequestLimiter, Translator};
use crate::common;

/// Translator that fails every other call
struct FlakyTranslator {
    calls: AtomicUsize,
}

#[async_trait]
impl Translator for FlakyTranslator {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            Ok(text.to_lowercase())
        } else {
            Err(TranslationError::Failed("backend unavailable".to_string()))
        }
    }
}

fn sample_file() -> CacheFile {
    let entries = extract_entries(&common::lines(common::SAMPLE_SCRIPT));
    CacheFile::from_entries("script.rpy", "utf-8", entries)
}

/// Test which translators go through the request limits
#[test]
fn test_isRateLimited_shouldDefaultToTrueAndSkipDictionary() {
    let flaky = FlakyTranslator { calls: AtomicUsize::new(0) };
    assert!(flaky.is_rate_limited());
    assert!(!Dictionary::default().is_rate_limited());
}

/// Test request limiter without limits
#[test]
fn test_tryAcquire_withUnlimitedLimiter_shouldAlwaysPass() {
    let limiter = RequestLimiter::unlimited();
    for _ in 0..100 {
        assert!(limiter.try_acquire(1_000_000));
    }
}

/// Test request spacing
#[test]
fn test_tryAcquire_withRequestsPerMinute_shouldRejectBackToBack() {
    let limiter = RequestLimiter::new(0, 0, 1);
    assert!(limiter.try_acquire(10));
    assert!(!limiter.try_acquire(10));
}

/// Test token bucket draining
#[test]
fn test_tryAcquire_withSmallBucket_shouldStopWhenEmpty() {
    let limiter = RequestLimiter::new(100, 1, 0);
    assert!(limiter.try_acquire(60));
    assert!(!limiter.try_acquire(60));
    // A failed attempt takes nothing
    assert!(limiter.try_acquire(40));
}

/// Test oversized requests
#[test]
fn test_tryAcquire_withRequestAboveBucket_shouldClampToBucket() {
    let limiter = RequestLimiter::new(100, 0, 0);
    assert!(limiter.try_acquire(10_000));
}

/// Test message token estimate
#[test]
fn test_numTokensFromMessages_shouldCountOverheadAndNames() {
    let messages = vec![
        json!({"role": "user", "content": "abcdefgh"}),
        json!({"role": "system", "name": "x", "content": ""}),
    ];
    // 3 per message, roles 1 + 2, contents 2 + 0, name 1 + 1, priming 3
    assert_eq!(num_tokens_from_messages(&messages), 3 + 1 + 2 + 3 + 2 + 1 + 1 + 3);
    assert_eq!(num_tokens_from_messages(&[]), 3);
}

/// Test dictionary lookups
#[test]
fn test_dictionary_withMissingText_shouldReturnNotFound() {
    let dictionary = Dictionary::from_json(r#"{"Start": "Commencer"}"#).unwrap();

    let (found, missing) = tokio_test::block_on(async {
        (dictionary.translate("Start").await, dictionary.translate("Quit").await)
    });
    assert_eq!(found.unwrap(), "Commencer");
    assert!(matches!(missing, Err(TranslationError::NotFound(_))));
    assert!(Dictionary::from_json("[1, 2]").is_err());
}

/// Test dispatching the sample through a dictionary
#[tokio::test]
async fn test_dispatcherRun_withDictionary_shouldTranslateKnownTexts() {
    let mut entries = HashMap::new();
    entries.insert("Start".to_string(), "Commencer".to_string());
    entries.insert("Quit".to_string(), "Quitter".to_string());

    let file = sample_file();
    let dispatcher = Dispatcher::new(
        Arc::new(Dictionary::new(entries)),
        Arc::new(RequestLimiter::unlimited()),
        TokenCounter::new(),
        2,
    );

    let progress = Arc::new(AtomicUsize::new(0));
    let seen = progress.clone();
    let summary = dispatcher
        .run(&file.items, move |done, total| {
            assert!(done <= total);
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .await;

    assert_eq!(summary.translated, 2);
    assert_eq!(summary.not_found, 3);
    assert_eq!(progress.load(Ordering::SeqCst), 5);
    assert_eq!(
        file.rewrites(),
        vec![(25, "Commencer".to_string()), (29, "Quitter".to_string())]
    );
    assert_eq!(file.items[3].model(), "dictionary");

    // A second run only revisits what is still untranslated
    let summary = dispatcher.run(&file.items, |_, _| {}).await;
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.not_found, 3);
}

/// Test that failures leave records retryable
#[tokio::test]
async fn test_dispatcherRun_withFailingTranslator_shouldRevertFailures() {
    let file = sample_file();
    let dispatcher = Dispatcher::new(
        Arc::new(FlakyTranslator { calls: AtomicUsize::new(0) }),
        Arc::new(RequestLimiter::unlimited()),
        TokenCounter::new(),
        1,
    );

    let summary = dispatcher.run(&file.items, |_, _| {}).await;
    assert_eq!(summary.translated + summary.failed, 5);
    assert_eq!(summary.failed, 2);
    assert_eq!(file.count_status(TranslationStatus::Untranslated), 2);
    assert_eq!(file.count_status(TranslationStatus::Translating), 0);
}

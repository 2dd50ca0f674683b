/*!
 * Concurrent dispatch of cache records to a translator.
 *
 * Every untranslated record is sent through the request limiter and then to
 * the translator, with at most `max_concurrent_requests` calls in flight.
 * Each record is updated under its own lock, so workers never coordinate
 * beyond the semaphore and the limiter.
 */

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

use crate::cache::{CacheItem, TokenCounter, TranslationStatus};
use crate::errors::TranslationError;

use super::Translator;
use super::limiter::RequestLimiter;

/// Outcome counts of one dispatch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Records that received a translation
    pub translated: usize,
    /// Records the translator had no result for
    pub not_found: usize,
    /// Records whose translation call failed
    pub failed: usize,
    /// Records that were not untranslated to begin with
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Translated,
    NotFound,
    Failed,
    Skipped,
}

/// Runs records through a translator under the configured limits
pub struct Dispatcher {
    translator: Arc<dyn Translator>,
    limiter: Arc<RequestLimiter>,
    counter: TokenCounter,
    max_concurrent_requests: usize,
}

impl Dispatcher {
    pub fn new(
        translator: Arc<dyn Translator>,
        limiter: Arc<RequestLimiter>,
        counter: TokenCounter,
        max_concurrent_requests: usize,
    ) -> Self {
        Self {
            translator,
            limiter,
            counter,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    /// Translate all untranslated records, with a progress callback `(done, total)`
    pub async fn run(
        &self,
        items: &[Arc<CacheItem>],
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> DispatchSummary {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_requests));
        let total = items.len();
        let processed = Arc::new(AtomicUsize::new(0));

        let outcomes = stream::iter(items.iter().cloned())
            .map(|item| {
                let semaphore = semaphore.clone();
                let processed = processed.clone();
                let progress_callback = progress_callback.clone();

                async move {
                    let outcome = match semaphore.acquire().await {
                        Ok(_permit) => self.translate_item(&item).await,
                        Err(_) => Outcome::Failed,
                    };
                    let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total);
                    outcome
                }
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect::<Vec<_>>()
            .await;

        let mut summary = DispatchSummary::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Translated => summary.translated += 1,
                Outcome::NotFound => summary.not_found += 1,
                Outcome::Failed => summary.failed += 1,
                Outcome::Skipped => summary.skipped += 1,
            }
        }
        summary
    }

    async fn translate_item(&self, item: &CacheItem) -> Outcome {
        if item.translation_status() != TranslationStatus::Untranslated {
            return Outcome::Skipped;
        }

        item.set_translation_status(TranslationStatus::Translating);
        let source_text = item.source_text();
        let tokens = item.token_count(&self.counter) as u64;
        self.limiter.acquire(tokens).await;

        match self.translator.translate(&source_text).await {
            Ok(translated) => {
                item.complete(&translated, self.translator.name());
                Outcome::Translated
            }
            Err(TranslationError::NotFound(_)) => {
                debug!("No translation for line {}", item.target_line_index() + 1);
                item.set_translation_status(TranslationStatus::Untranslated);
                Outcome::NotFound
            }
            Err(e) => {
                warn!("Translation failed for line {}: {}", item.target_line_index() + 1, e);
                item.set_translation_status(TranslationStatus::Untranslated);
                Outcome::Failed
            }
        }
    }
}

/*!
 * Memoized token estimates.
 *
 * Counting is a pure function of the text, so results are shared between all
 * workers through one map behind a read-write lock.
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::RwLock;
use log::trace;

/// Rough token estimate: about 4 characters per token
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Shared memo of token counts keyed by text
#[derive(Debug, Clone, Default)]
pub struct TokenCounter {
    /// Cached counts
    cache: Arc<RwLock<HashMap<String, usize>>>,

    /// Cache hit counter
    hits: Arc<AtomicUsize>,

    /// Cache miss counter
    misses: Arc<AtomicUsize>,
}

impl TokenCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token count of `text`, computed once per distinct text
    pub fn count(&self, text: &str) -> usize {
        if let Some(count) = self.cache.read().get(text) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return *count;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let count = estimate_tokens(text);
        trace!("Token count {} for {} chars", count, text.len());
        self.cache.write().entry(text.to_string()).or_insert(count);
        count
    }

    /// (hits, misses)
    pub fn stats(&self) -> (usize, usize) {
        (self.hits.load(Ordering::Relaxed), self.misses.load(Ordering::Relaxed))
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    pub fn clear(&self) {
        self.cache.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

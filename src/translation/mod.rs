/*!
 * Translation of extracted records.
 *
 * This module contains the seam to translation backends and the machinery
 * that feeds records to them:
 *
 * - `limiter`: request and token rate limiting
 * - `dispatcher`: concurrent, rate-limited dispatch of cache records
 * - `dictionary`: a lookup-table translator
 */

use async_trait::async_trait;

use crate::errors::TranslationError;

/// A backend that turns one source text into its translation
#[async_trait]
pub trait Translator: Send + Sync {
    /// Name recorded as the model of translated records
    fn name(&self) -> &str;

    /// Whether requests must pass the configured request limits.
    /// In-process backends return `false`.
    fn is_rate_limited(&self) -> bool {
        true
    }

    /// Translate one text
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

// Re-export main types for easier usage
pub use self::dictionary::Dictionary;
pub use self::dispatcher::{DispatchSummary, Dispatcher};
pub use self::limiter::{num_tokens_from_messages, RequestLimiter};

// Submodules
pub mod dictionary;
pub mod dispatcher;
pub mod limiter;

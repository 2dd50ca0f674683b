/*!
 * Request rate limiting for translation calls.
 *
 * Two limits apply to every request:
 * - requests per minute, enforced as a minimum spacing between requests
 * - tokens per minute, enforced with a token bucket that refills continuously
 */

use parking_lot::Mutex;
use serde_json::Value;
use std::time::{Duration, Instant};
use log::trace;

use crate::cache::estimate_tokens;

// @const: Sleep between acquisition attempts
const ACQUIRE_POLL_MS: u64 = 20;

// @const: Per-message overhead of chat-style requests
const TOKENS_PER_MESSAGE: usize = 3;
const TOKENS_PER_NAME: usize = 1;
const REPLY_PRIMING_TOKENS: usize = 3;

#[derive(Debug)]
struct LimiterState {
    /// Bucket capacity, 0 for no token limit
    max_tokens: u64,
    remaining_tokens: f64,
    /// Refill rate, 0 for an always-full bucket
    tokens_per_second: f64,
    last_refill: Instant,
    /// Minimum spacing between requests
    request_interval: Duration,
    last_request: Option<Instant>,
}

/// Gate in front of a translation backend
#[derive(Debug)]
pub struct RequestLimiter {
    state: Mutex<LimiterState>,
}

impl RequestLimiter {
    pub fn new(max_tokens: u64, tokens_per_minute: u64, requests_per_minute: u32) -> Self {
        let limiter = Self {
            state: Mutex::new(LimiterState {
                max_tokens: 0,
                remaining_tokens: 0.0,
                tokens_per_second: 0.0,
                last_refill: Instant::now(),
                request_interval: Duration::ZERO,
                last_request: None,
            }),
        };
        limiter.set_limit(max_tokens, tokens_per_minute, requests_per_minute);
        limiter
    }

    /// A limiter that never blocks
    pub fn unlimited() -> Self {
        Self::new(0, 0, 0)
    }

    /// Reset all limits; the bucket starts full
    pub fn set_limit(&self, max_tokens: u64, tokens_per_minute: u64, requests_per_minute: u32) {
        let mut state = self.state.lock();
        state.max_tokens = max_tokens;
        state.remaining_tokens = max_tokens as f64;
        state.tokens_per_second = tokens_per_minute as f64 / 60.0;
        state.last_refill = Instant::now();
        state.request_interval = if requests_per_minute == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(60.0 / requests_per_minute as f64)
        };
    }

    /// Take a request slot and `tokens` if both limits allow it right now
    pub fn try_acquire(&self, tokens: u64) -> bool {
        self.try_acquire_at(tokens, Instant::now())
    }

    fn try_acquire_at(&self, tokens: u64, now: Instant) -> bool {
        let mut state = self.state.lock();

        let elapsed = now.saturating_duration_since(state.last_refill).as_secs_f64();
        state.remaining_tokens = if state.tokens_per_second > 0.0 {
            (state.remaining_tokens + elapsed * state.tokens_per_second).min(state.max_tokens as f64)
        } else {
            state.max_tokens as f64
        };
        state.last_refill = now;

        if let Some(last_request) = state.last_request {
            if now.saturating_duration_since(last_request) < state.request_interval {
                return false;
            }
        }

        // A request larger than the bucket could never pass otherwise
        let tokens = if state.max_tokens > 0 { tokens.min(state.max_tokens) as f64 } else { 0.0 };
        if tokens > state.remaining_tokens {
            trace!("Token bucket short: need {}, have {:.1}", tokens, state.remaining_tokens);
            return false;
        }

        state.remaining_tokens -= tokens;
        state.last_request = Some(now);
        true
    }

    /// Wait until the request can go out
    pub async fn acquire(&self, tokens: u64) {
        while !self.try_acquire(tokens) {
            tokio::time::sleep(Duration::from_millis(ACQUIRE_POLL_MS)).await;
        }
    }

    pub fn remaining_tokens(&self) -> f64 {
        self.state.lock().remaining_tokens
    }
}

/// Token estimate of a chat-style message list.
///
/// Each message costs a fixed overhead plus its string values; a `name`
/// field costs one extra token. Non-string values are ignored.
pub fn num_tokens_from_messages(messages: &[Value]) -> usize {
    let mut num_tokens = 0;
    for message in messages {
        num_tokens += TOKENS_PER_MESSAGE;
        if let Some(fields) = message.as_object() {
            for (key, value) in fields {
                if let Some(text) = value.as_str() {
                    num_tokens += estimate_tokens(text);
                }
                if key == "name" {
                    num_tokens += TOKENS_PER_NAME;
                }
            }
        }
    }
    num_tokens + REPLY_PRIMING_TOKENS
}

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 60 * 60;

#[derive(Clone, Debug)]
pub struct PantryChefConfig {
    pub llm: LLMConfig,
    pub session: SessionConfig,
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Sessions untouched for longer than this are evicted.
    pub idle_ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: DEFAULT_SESSION_IDLE_TTL_SECS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            request_timeout_secs: 60,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

/// Monotonic counter used as the unique suffix of synthesized ids.
///
/// Every gateway call takes one batch number, so ids built from
/// `(index, batch)` never collide for the lifetime of the process.
#[derive(Debug, Default)]
pub struct IdSequence(AtomicU64);

impl IdSequence {
    pub fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    pub fn next_batch(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

pub fn synthesize_id(prefix: &str, index: usize, batch: u64) -> String {
    format!("{prefix}-{index}-{batch}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_sequence_is_monotonic() {
        let sequence = IdSequence::new();
        let first = sequence.next_batch();
        let second = sequence.next_batch();
        assert!(second > first);
    }

    #[test]
    fn test_synthesize_id_format() {
        assert_eq!(synthesize_id("ing", 2, 7), "ing-2-7");
    }
}

//! Cache entry bookkeeping and tuning parameters.

use std::time::{Duration, Instant};

/// Tuning for the query cache.
///
/// The defaults mirror the documented environment defaults: five-minute
/// freshness, ten-minute idle eviction, two transient retries with capped
/// exponential backoff.
#[derive(Debug, Clone)]
pub struct CacheTuning {
    /// How long a fetched value is served without revalidation.
    pub fresh_window: Duration,
    /// How long an unaccessed entry survives before eviction.
    pub gc_window: Duration,
    /// Capacity bound for the LRU store.
    pub max_entries: usize,
    /// How many times a transient failure is re-issued.
    pub max_retries: u32,
    /// First retry delay; doubles per attempt.
    pub backoff_base: Duration,
    /// Ceiling on the retry delay.
    pub backoff_cap: Duration,
}

impl Default for CacheTuning {
    fn default() -> Self {
        Self {
            fresh_window: Duration::from_secs(300),
            gc_window: Duration::from_secs(600),
            max_entries: 1_000,
            max_retries: 2,
            backoff_base: Duration::from_millis(250),
            backoff_cap: Duration::from_secs(2),
        }
    }
}

impl CacheTuning {
    /// Delay before re-issuing the fetch after `attempt` failed tries.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.backoff_base.saturating_mul(factor).min(self.backoff_cap)
    }
}

/// A resolved cache entry.
///
/// Entries never mutate in place; a completed fetch replaces the whole entry,
/// and only `last_access` moves on reads. `applied_seq` records which fetch
/// produced the value so out-of-order completions can be discarded.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    pub value: Vec<u8>,
    pub fresh_until: Instant,
    pub last_access: Instant,
    pub applied_seq: u64,
}

impl CacheEntry {
    pub fn new(value: Vec<u8>, fresh_for: Duration, seq: u64) -> Self {
        let now = Instant::now();
        Self {
            value,
            fresh_until: now + fresh_for,
            last_access: now,
            applied_seq: seq,
        }
    }

    /// Served without revalidation while fresh.
    pub fn is_fresh(&self, now: Instant) -> bool {
        now < self.fresh_until
    }

    /// Eligible for eviction once idle past the GC window.
    pub fn is_idle(&self, now: Instant, gc_window: Duration) -> bool {
        now.duration_since(self.last_access) >= gc_window
    }
}

//! The query cache coordinator.
//!
//! Owns the only shared mutable state in the process: an LRU map of resolved
//! entries plus the in-flight fetch table. Callers hand it a resource key and
//! a fetch closure; it serves fresh values without fetching, serves stale
//! values while revalidating in the background, joins concurrent identical
//! requests onto one underlying fetch, retries transient failures, and
//! discards out-of-order completions by per-key sequence number.

use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::{broadcast, Mutex};

use briefdesk_core::api::SourceError;
use briefdesk_core::query::key_matches;

use super::cache::{CacheEntry, CacheTuning};

type FetchOutcome = Result<Vec<u8>, SourceError>;

/// An in-flight fetch that concurrent callers can join.
///
/// Held separately from the entry map so eviction never disturbs a running
/// fetch; completion re-populates the map regardless.
#[derive(Debug)]
struct InFlight {
    seq: u64,
    tx: broadcast::Sender<FetchOutcome>,
}

#[derive(Debug)]
struct Inner {
    entries: LruCache<String, CacheEntry>,
    inflight: HashMap<String, InFlight>,
    /// Monotonic fetch counters, per key.
    next_seq: HashMap<String, u64>,
    last_sweep: Instant,
}

/// Process-wide query cache.
///
/// Cloning shares the underlying store. Values are opaque JSON bytes; typed
/// callers serialize at the boundary.
#[derive(Debug, Clone)]
pub struct QueryCache {
    inner: Arc<Mutex<Inner>>,
    tuning: Arc<CacheTuning>,
}

impl QueryCache {
    /// Creates a cache with the given tuning.
    ///
    /// # Panics
    ///
    /// Panics if `tuning.max_entries` is 0.
    pub fn new(tuning: CacheTuning) -> Self {
        let capacity = NonZeroUsize::new(tuning.max_entries).expect("max_entries must be > 0");
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: LruCache::new(capacity),
                inflight: HashMap::new(),
                next_seq: HashMap::new(),
                last_sweep: Instant::now(),
            })),
            tuning: Arc::new(tuning),
        }
    }

    /// Resolves a key to its cached value, fetching as needed.
    ///
    /// Fresh entries are returned without calling `fetch`. Stale entries are
    /// returned immediately while a background revalidation runs (joining an
    /// already in-flight one instead of starting a second). On a miss the
    /// caller awaits the fetch in the foreground; concurrent callers for the
    /// same key share one underlying invocation.
    pub async fn resolve<F, Fut>(&self, key: &str, fetch: F) -> FetchOutcome
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FetchOutcome> + Send + 'static,
    {
        let now = Instant::now();
        let mut inner = self.inner.lock().await;
        self.maybe_sweep(&mut inner, now);

        // Lazy idle eviction, same as a sweep would do.
        if inner
            .entries
            .peek(key)
            .is_some_and(|entry| entry.is_idle(now, self.tuning.gc_window))
        {
            tracing::debug!(key, "evicting idle entry on access");
            inner.entries.pop(key);
        }

        enum Lookup {
            Fresh(Vec<u8>),
            Stale(Vec<u8>),
            Miss,
        }

        let lookup = match inner.entries.get_mut(key) {
            Some(entry) => {
                entry.last_access = now;
                if entry.is_fresh(now) {
                    Lookup::Fresh(entry.value.clone())
                } else {
                    Lookup::Stale(entry.value.clone())
                }
            }
            None => Lookup::Miss,
        };

        match lookup {
            Lookup::Fresh(value) => {
                tracing::debug!(key, "cache hit");
                Ok(value)
            }
            Lookup::Stale(value) => {
                // Serve the stale value now; refresh behind the caller's back.
                if !inner.inflight.contains_key(key) {
                    let seq = Self::next_seq(&mut inner, key);
                    let (tx, _) = broadcast::channel(4);
                    inner.inflight.insert(
                        key.to_string(),
                        InFlight {
                            seq,
                            tx: tx.clone(),
                        },
                    );
                    tracing::debug!(key, seq, "stale hit, revalidating in background");
                    self.spawn_fetch(key.to_string(), seq, fetch, self.tuning.fresh_window, tx);
                } else {
                    tracing::debug!(key, "stale hit, revalidation already in flight");
                }
                Ok(value)
            }
            Lookup::Miss => {
                let joined = inner.inflight.get(key).map(|f| f.tx.subscribe());
                let mut rx = match joined {
                    Some(rx) => {
                        tracing::debug!(key, "joining in-flight fetch");
                        rx
                    }
                    None => {
                        let seq = Self::next_seq(&mut inner, key);
                        let (tx, rx) = broadcast::channel(4);
                        inner.inflight.insert(
                            key.to_string(),
                            InFlight {
                                seq,
                                tx: tx.clone(),
                            },
                        );
                        tracing::debug!(key, seq, "cache miss, fetching");
                        self.spawn_fetch(key.to_string(), seq, fetch, self.tuning.fresh_window, tx);
                        rx
                    }
                };
                drop(inner);

                match rx.recv().await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(SourceError::Unknown(
                        "fetch completed without reporting a result".to_string(),
                    )),
                }
            }
        }
    }

    /// Fetches unconditionally, bypassing freshness.
    ///
    /// Takes a new sequence number even when a fetch is already in flight, so
    /// the forced result wins. The entry is recorded with a zero-length
    /// freshness window: the next normal request serves it stale and
    /// revalidates per the usual window.
    pub async fn force_refresh<F, Fut>(&self, key: &str, fetch: F) -> FetchOutcome
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FetchOutcome> + Send + 'static,
    {
        let mut inner = self.inner.lock().await;
        let seq = Self::next_seq(&mut inner, key);
        let (tx, mut rx) = broadcast::channel(4);
        // Replaces any in-flight record; late completions of the old fetch
        // lose the sequence comparison and are discarded.
        inner.inflight.insert(
            key.to_string(),
            InFlight {
                seq,
                tx: tx.clone(),
            },
        );
        tracing::debug!(key, seq, "forced refresh");
        self.spawn_fetch(key.to_string(), seq, fetch, Duration::ZERO, tx);
        drop(inner);

        match rx.recv().await {
            Ok(outcome) => outcome,
            Err(_) => Err(SourceError::Unknown(
                "fetch completed without reporting a result".to_string(),
            )),
        }
    }

    /// Drops one entry. In-flight fetches are unaffected.
    pub async fn invalidate(&self, key: &str) {
        let mut inner = self.inner.lock().await;
        inner.entries.pop(key);
    }

    /// Drops every entry whose key matches the glob pattern.
    pub async fn invalidate_pattern(&self, pattern: &str) {
        let mut inner = self.inner.lock().await;
        let matching: Vec<String> = inner
            .entries
            .iter()
            .filter(|(key, _)| key_matches(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &matching {
            inner.entries.pop(key);
        }
        if !matching.is_empty() {
            tracing::debug!(pattern, count = matching.len(), "invalidated entries");
        }
    }

    /// Evicts entries idle past the GC window and prunes dead sequence
    /// counters. Runs opportunistically during resolution as well.
    pub async fn sweep(&self) {
        let mut inner = self.inner.lock().await;
        Self::sweep_locked(&mut inner, Instant::now(), &self.tuning);
    }

    /// Number of resolved entries currently held.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn maybe_sweep(&self, inner: &mut Inner, now: Instant) {
        let interval = self.tuning.gc_window / 4;
        if now.duration_since(inner.last_sweep) >= interval {
            Self::sweep_locked(inner, now, &self.tuning);
        }
    }

    fn sweep_locked(inner: &mut Inner, now: Instant, tuning: &CacheTuning) {
        let idle: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_idle(now, tuning.gc_window))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &idle {
            inner.entries.pop(key);
        }
        if !idle.is_empty() {
            tracing::debug!(count = idle.len(), "swept idle entries");
        }

        // Sequence counters only matter while a key has an entry or a fetch.
        let inflight = &inner.inflight;
        let entries = &inner.entries;
        inner
            .next_seq
            .retain(|key, _| entries.contains(key) || inflight.contains_key(key));
        inner.last_sweep = now;
    }

    fn next_seq(inner: &mut Inner, key: &str) -> u64 {
        let counter = inner.next_seq.entry(key.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Runs the fetch (with retry) on its own task and applies the outcome.
    ///
    /// Running detached means a caller that stops awaiting neither cancels
    /// the fetch nor blocks the write-back; the result still lands in the
    /// cache for future consumers.
    fn spawn_fetch<F, Fut>(
        &self,
        key: String,
        seq: u64,
        fetch: F,
        fresh_for: Duration,
        tx: broadcast::Sender<FetchOutcome>,
    ) where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FetchOutcome> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let tuning = Arc::clone(&self.tuning);
        tokio::spawn(async move {
            let outcome = fetch_with_retry(&key, &fetch, &tuning).await;

            let mut inner = inner.lock().await;
            // Only clear the in-flight record if it is still ours; a forced
            // refresh may have superseded this fetch.
            if inner.inflight.get(&key).is_some_and(|f| f.seq == seq) {
                inner.inflight.remove(&key);
            }
            if let Ok(value) = &outcome {
                let applied = inner
                    .entries
                    .peek(&key)
                    .map(|entry| entry.applied_seq)
                    .unwrap_or(0);
                if seq > applied {
                    inner
                        .entries
                        .put(key.clone(), CacheEntry::new(value.clone(), fresh_for, seq));
                } else {
                    tracing::debug!(key = %key, seq, applied, "discarding out-of-order response");
                }
            }
            // Failures never overwrite a cached value; joiners still see the
            // error. Send fails harmlessly when every joiner went away.
            let _ = tx.send(outcome);
        });
    }
}

async fn fetch_with_retry<F, Fut>(key: &str, fetch: &F, tuning: &CacheTuning) -> FetchOutcome
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = FetchOutcome> + Send,
{
    let mut attempt = 0;
    loop {
        match fetch().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < tuning.max_retries => {
                let delay = tuning.backoff(attempt);
                tracing::debug!(
                    key,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "retrying transient failure"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                match &err {
                    SourceError::Unknown(_) => {
                        tracing::warn!(key, error = %err, "unclassified fetch failure")
                    }
                    SourceError::Transient(_) => {
                        tracing::warn!(key, error = %err, "retries exhausted")
                    }
                    _ => tracing::debug!(key, error = %err, "terminal fetch failure"),
                }
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_tuning(fresh: Duration, gc: Duration) -> CacheTuning {
        CacheTuning {
            fresh_window: fresh,
            gc_window: gc,
            max_entries: 100,
            max_retries: 2,
            backoff_base: Duration::from_millis(1),
            backoff_cap: Duration::from_millis(5),
        }
    }

    fn counting_fetch(
        calls: Arc<AtomicUsize>,
        value: &'static str,
        delay: Duration,
    ) -> impl Fn() -> std::pin::Pin<Box<dyn Future<Output = FetchOutcome> + Send>> + Send + Sync + 'static
    {
        move || {
            let calls = calls.clone();
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(value.as_bytes().to_vec())
            })
        }
    }

    #[tokio::test]
    async fn test_fresh_hit_skips_fetch() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_secs(120),
        ));
        let calls = Arc::new(AtomicUsize::new(0));

        let first = cache
            .resolve("dashboard:overview", counting_fetch(calls.clone(), "v1", Duration::ZERO))
            .await
            .unwrap();
        let second = cache
            .resolve("dashboard:overview", counting_fetch(calls.clone(), "v2", Duration::ZERO))
            .await
            .unwrap();

        assert_eq!(first, b"v1");
        assert_eq!(second, b"v1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_fetch() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_secs(120),
        ));
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            cache.resolve(
                "clients?limit=10&page=1",
                counting_fetch(calls.clone(), "v", Duration::from_millis(40)),
            ),
            cache.resolve(
                "clients?limit=10&page=1",
                counting_fetch(calls.clone(), "v", Duration::from_millis(40)),
            ),
        );

        assert_eq!(a.unwrap(), b"v");
        assert_eq!(b.unwrap(), b"v");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_while_revalidate() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_millis(20),
            Duration::from_secs(120),
        ));
        let calls = Arc::new(AtomicUsize::new(0));
        let fetch = {
            let calls = calls.clone();
            move || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    Ok(format!("v{n}").into_bytes())
                }
            }
        };

        assert_eq!(cache.resolve("k", fetch.clone()).await.unwrap(), b"v1");
        tokio::time::sleep(Duration::from_millis(40)).await;

        // Stale read returns the old value immediately.
        assert_eq!(cache.resolve("k", fetch.clone()).await.unwrap(), b"v1");

        // After the background revalidation lands, the new value is served.
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.resolve("k", fetch).await.unwrap(), b"v2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_not_found_is_never_retried() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_secs(120),
        ));
        let calls = Arc::new(AtomicUsize::new(0));
        let fetch = {
            let calls = calls.clone();
            move || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<Vec<u8>, _>(SourceError::not_found("Client", "client-404"))
                }
            }
        };

        let error = cache.resolve("clients:client-404", fetch).await.unwrap_err();

        assert!(error.is_not_found());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_transient_failures_retry_then_succeed() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_secs(120),
        ));
        let calls = Arc::new(AtomicUsize::new(0));
        let fetch = {
            let calls = calls.clone();
            move || {
                let calls = calls.clone();
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(SourceError::Transient("HTTP 503".to_string()))
                    } else {
                        Ok(b"recovered".to_vec())
                    }
                }
            }
        };

        let value = cache.resolve("k", fetch).await.unwrap();

        assert_eq!(value, b"recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_transient_retries_exhaust() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_secs(120),
        ));
        let calls = Arc::new(AtomicUsize::new(0));
        let fetch = {
            let calls = calls.clone();
            move || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<Vec<u8>, _>(SourceError::Transient("timeout".to_string()))
                }
            }
        };

        let error = cache.resolve("k", fetch).await.unwrap_err();

        assert!(error.is_retryable());
        // Initial attempt plus max_retries.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_freshness() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_secs(120),
        ));
        let calls = Arc::new(AtomicUsize::new(0));

        let first = cache
            .resolve("brief", counting_fetch(calls.clone(), "old", Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(first, b"old");

        let forced = cache
            .force_refresh("brief", counting_fetch(calls.clone(), "new", Duration::ZERO))
            .await
            .unwrap();

        assert_eq!(forced, b"new");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_forced_entry_revalidates_on_next_read() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_secs(120),
        ));
        let calls = Arc::new(AtomicUsize::new(0));

        cache
            .force_refresh("brief", counting_fetch(calls.clone(), "forced", Duration::ZERO))
            .await
            .unwrap();

        // Zero-length freshness window: the next read serves the forced value
        // but kicks off a revalidation.
        let value = cache
            .resolve("brief", counting_fetch(calls.clone(), "revalidated", Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(value, b"forced");

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            cache
                .resolve("brief", counting_fetch(calls.clone(), "x", Duration::ZERO))
                .await
                .unwrap(),
            b"revalidated"
        );
    }

    #[tokio::test]
    async fn test_newer_sequence_wins_over_slow_fetch() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_secs(120),
        ));
        let calls = Arc::new(AtomicUsize::new(0));

        let slow_cache = cache.clone();
        let slow_calls = calls.clone();
        let slow = tokio::spawn(async move {
            slow_cache
                .force_refresh("k", counting_fetch(slow_calls, "old", Duration::from_millis(80)))
                .await
        });

        // Let the slow fetch start, then supersede it.
        tokio::time::sleep(Duration::from_millis(10)).await;
        let fast = cache
            .force_refresh("k", counting_fetch(calls.clone(), "new", Duration::from_millis(5)))
            .await
            .unwrap();
        assert_eq!(fast, b"new");

        // The slow fetch completes afterwards and must not overwrite.
        slow.await.unwrap().unwrap();
        let value = cache
            .resolve("k", counting_fetch(calls.clone(), "x", Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(value, b"new");
    }

    #[tokio::test]
    async fn test_idle_entries_are_swept() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_millis(30),
        ));
        let calls = Arc::new(AtomicUsize::new(0));

        cache
            .resolve("k", counting_fetch(calls.clone(), "v", Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(cache.len().await, 1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        cache.sweep().await;

        assert!(cache.is_empty().await);
        // Next read is a plain miss.
        cache
            .resolve("k", counting_fetch(calls.clone(), "v", Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_idle_entry_expires_lazily_on_access() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_millis(30),
        ));
        let calls = Arc::new(AtomicUsize::new(0));

        cache
            .resolve("k", counting_fetch(calls.clone(), "v1", Duration::ZERO))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        // No sweep ran; the access itself notices the idle entry. The read
        // blocks on a foreground fetch rather than serving the dead value.
        let value = cache
            .resolve("k", counting_fetch(calls.clone(), "v2", Duration::ZERO))
            .await
            .unwrap();

        assert_eq!(value, b"v2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_sweep_leaves_inflight_fetches_alone() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_millis(10),
        ));
        let calls = Arc::new(AtomicUsize::new(0));

        let bg_cache = cache.clone();
        let bg_calls = calls.clone();
        let pending = tokio::spawn(async move {
            bg_cache
                .resolve("k", counting_fetch(bg_calls, "v", Duration::from_millis(60)))
                .await
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        cache.sweep().await;

        assert_eq!(pending.await.unwrap().unwrap(), b"v");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dropped_caller_still_populates_cache() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_secs(120),
        ));
        let calls = Arc::new(AtomicUsize::new(0));

        let bg_cache = cache.clone();
        let bg_calls = calls.clone();
        let caller = tokio::spawn(async move {
            bg_cache
                .resolve("k", counting_fetch(bg_calls, "v", Duration::from_millis(40)))
                .await
        });

        // The consumer navigates away before resolution.
        tokio::time::sleep(Duration::from_millis(10)).await;
        caller.abort();

        tokio::time::sleep(Duration::from_millis(60)).await;
        let value = cache
            .resolve("k", counting_fetch(calls.clone(), "x", Duration::ZERO))
            .await
            .unwrap();

        assert_eq!(value, b"v");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_pattern_scopes_to_client() {
        let cache = QueryCache::new(test_tuning(
            Duration::from_secs(60),
            Duration::from_secs(120),
        ));
        let calls = Arc::new(AtomicUsize::new(0));

        cache
            .resolve(
                "clients:client-1:meetings",
                counting_fetch(calls.clone(), "m", Duration::ZERO),
            )
            .await
            .unwrap();
        cache
            .resolve(
                "meetings:upcoming",
                counting_fetch(calls.clone(), "u", Duration::ZERO),
            )
            .await
            .unwrap();

        cache.invalidate_pattern("clients:client-1:*").await;

        // The scoped entry refetches; the unrelated one is still fresh.
        cache
            .resolve(
                "clients:client-1:meetings",
                counting_fetch(calls.clone(), "m", Duration::ZERO),
            )
            .await
            .unwrap();
        cache
            .resolve(
                "meetings:upcoming",
                counting_fetch(calls.clone(), "u", Duration::ZERO),
            )
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}

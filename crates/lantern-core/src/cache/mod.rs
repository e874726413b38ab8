//! Short-lived judgment cache (in-memory).
//!
//! Keyed by the canonical rank-request digest from
//! [`hash_rank_request`](crate::hashing::hash_rank_request). Entries expire
//! after a fixed TTL and the whole cache is process-lifetime state: it is a
//! latency optimization, never a correctness dependency, and nothing
//! persists across restarts.

use std::time::Duration;

use moka::sync::Cache;

use crate::judge::Judgment;

/// A remote judge reply as cached: the raw text plus the decoded verdict.
/// The verdict is `None` when the reply was unparseable — "no opinion" is a
/// cacheable outcome too, so a flaky reply is not retried inside the TTL.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedJudgment {
    pub raw: String,
    pub judgment: Option<Judgment>,
}

/// TTL cache for rank-request judgments.
pub struct JudgmentCache {
    entries: Cache<[u8; 32], CachedJudgment>,
    ttl: Duration,
}

impl JudgmentCache {
    const DEFAULT_CAPACITY: u64 = 4096;

    /// Creates a cache with the default capacity and the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY, ttl)
    }

    /// Creates a cache with a max entry capacity (LRU eviction) and TTL.
    pub fn with_capacity(capacity: u64, ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
            ttl,
        }
    }

    /// Looks up a judgment by request digest; expired entries miss.
    #[inline]
    pub fn get(&self, key: &[u8; 32]) -> Option<CachedJudgment> {
        self.entries.get(key)
    }

    /// Stores a judgment under the request digest for one TTL.
    #[inline]
    pub fn insert(&self, key: [u8; 32], value: CachedJudgment) {
        self.entries.insert(key, value);
    }

    /// The configured time-to-live.
    #[inline]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of live entries (approximate until pending tasks run).
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Drops all entries.
    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl std::fmt::Debug for JudgmentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JudgmentCache")
            .field("entries", &self.entries.entry_count())
            .field("ttl", &self.ttl)
            .finish()
    }
}

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::cache::{CachedJudgment, JudgmentCache};
use crate::candidate::Candidate;
use crate::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_RATE_CEILING, DEFAULT_RATE_WINDOW_SECS, REMOTE_CANDIDATE_CAP,
};
use crate::hashing::hash_rank_request;
use crate::judge::{JudgeBackend, Judgment, SYSTEM_DIRECTIVE, build_prompt, parse_judgment};
use crate::ratelimit::{Clock, RateDecision, RateLimiter, SystemClock};

/// Outcome of one rank request.
#[derive(Debug, Clone, PartialEq)]
pub struct RankReply {
    /// Raw judge reply text, cached or fresh.
    pub raw: String,
    /// Decoded verdict; `None` when the reply did not parse.
    pub judgment: Option<Judgment>,
    /// Whether the reply came from the cache.
    pub cached: bool,
}

#[derive(Debug, Error)]
pub enum RankError {
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
    #[error("upstream judge failed: {0}")]
    Upstream(String),
}

/// The rank pipeline: rate gate, cache lookup, judge call, cache fill.
///
/// The rate gate runs before the cache so a limited client cannot keep a
/// hot entry free to hit. Unparseable judge replies are cached as
/// "no opinion" and served from cache like any other entry.
pub struct RankService<J: JudgeBackend, C: Clock = SystemClock> {
    judge: J,
    cache: JudgmentCache,
    limiter: RateLimiter<C>,
}

impl<J: JudgeBackend> RankService<J> {
    /// Service with default rate window and cache TTL.
    pub fn new(judge: J) -> Self {
        Self::with_parts(
            judge,
            JudgmentCache::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS)),
            RateLimiter::new(
                DEFAULT_RATE_CEILING,
                Duration::from_secs(DEFAULT_RATE_WINDOW_SECS),
            ),
        )
    }
}

impl<J: JudgeBackend, C: Clock> RankService<J, C> {
    pub fn with_parts(judge: J, cache: JudgmentCache, limiter: RateLimiter<C>) -> Self {
        Self {
            judge,
            cache,
            limiter,
        }
    }

    /// Runs one rank request for `client_id`.
    ///
    /// Candidates beyond the remote cap are dropped before hashing and
    /// prompting, so the verdict index space and the cache key always agree
    /// on the same truncated list.
    #[instrument(skip_all, fields(client_id = client_id, candidates = candidates.len()))]
    pub async fn rank(
        &self,
        client_id: u64,
        query: &str,
        candidates: &[Candidate],
    ) -> Result<RankReply, RankError> {
        if let RateDecision::Limited { retry_after_secs } = self.limiter.check(client_id) {
            return Err(RankError::RateLimited { retry_after_secs });
        }

        let query = query.trim();
        if query.is_empty() {
            return Err(RankError::EmptyQuery);
        }

        let capped = &candidates[..candidates.len().min(REMOTE_CANDIDATE_CAP)];
        let key = hash_rank_request(query, capped);

        if let Some(hit) = self.cache.get(&key) {
            debug!("rank cache hit");
            return Ok(RankReply {
                raw: hit.raw,
                judgment: hit.judgment,
                cached: true,
            });
        }

        let prompt = build_prompt(query, capped);
        let raw = self
            .judge
            .complete(SYSTEM_DIRECTIVE, &prompt)
            .await
            .map_err(|err| RankError::Upstream(err.to_string()))?;
        let judgment = parse_judgment(&raw);

        self.cache.insert(
            key,
            CachedJudgment {
                raw: raw.clone(),
                judgment: judgment.clone(),
            },
        );

        Ok(RankReply {
            raw,
            judgment,
            cached: false,
        })
    }

    /// The cache behind this service, for observability surfaces.
    pub fn cache(&self) -> &JudgmentCache {
        &self.cache
    }
}

impl<J: JudgeBackend, C: Clock> std::fmt::Debug for RankService<J, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankService")
            .field("cache", &self.cache)
            .field("limiter", &self.limiter)
            .finish()
    }
}

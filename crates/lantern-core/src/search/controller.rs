use tracing::{debug, instrument, warn};

use super::traits::{CandidateSource, Highlighter, RankTransport, SourceError, TransportError};
use crate::candidate::{Candidate, ScoredCandidate};
use crate::constants::{DEFAULT_MIN_SCORE, DEFAULT_TOP_N, REMOTE_CANDIDATE_CAP};
use crate::scoring::rank_with;

/// Why the remote path was abandoned for the local heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The gateway rejected the request for this window.
    RateLimited { retry_after_secs: u64 },
    /// The gateway or its judge failed.
    Upstream(String),
    /// The judge replied but the reply did not decode.
    NoJudgment,
    /// The judge explicitly picked nothing.
    Declined,
    /// The judge named an index outside the roster it was shown.
    IndexOutOfBounds { index: i64 },
}

/// Terminal result of one search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The remote judge picked a candidate.
    RemoteMatch {
        winner: Candidate,
        reason: String,
        highlighted: bool,
    },
    /// The local heuristic produced the results after a remote failure.
    LocalMatches {
        matches: Vec<ScoredCandidate>,
        fallback: FallbackReason,
        highlighted: bool,
    },
    /// Nothing on the page matched (or the query was empty).
    NotFound,
    /// The page itself could not be scanned.
    Unsearchable { detail: String },
}

/// Remote-first search over one candidate source.
pub struct SearchController<S, T, H> {
    source: S,
    transport: T,
    highlighter: H,
    top_n: usize,
    min_score: i32,
}

impl<S, T, H> SearchController<S, T, H>
where
    S: CandidateSource,
    T: RankTransport,
    H: Highlighter,
{
    pub fn new(source: S, transport: T, highlighter: H) -> Self {
        Self {
            source,
            transport,
            highlighter,
            top_n: DEFAULT_TOP_N,
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    pub fn with_limits(mut self, top_n: usize, min_score: i32) -> Self {
        self.top_n = top_n;
        self.min_score = min_score;
        self
    }

    /// Runs one search.
    ///
    /// The remote judge sees at most the first 80 candidates; the local
    /// fallback ranks the full extracted list. A remote verdict is honored
    /// only when its index lands inside the roster the judge was shown.
    #[instrument(skip_all, fields(query_len = query.len()))]
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::NotFound;
        }

        let candidates = match self.source.collect(query).await {
            Ok(candidates) => candidates,
            Err(SourceError::Unreachable(detail)) => {
                warn!(%detail, "candidate source unreachable");
                return SearchOutcome::Unsearchable { detail };
            }
        };
        if candidates.is_empty() {
            return SearchOutcome::NotFound;
        }

        let roster = &candidates[..candidates.len().min(REMOTE_CANDIDATE_CAP)];
        let fallback = match self.transport.rank(query, roster).await {
            Ok(reply) => match reply.judgment {
                Some(judgment) if judgment.is_pick() => {
                    let index = judgment.index;
                    match usize::try_from(index).ok().and_then(|i| roster.get(i)) {
                        Some(winner) => {
                            let highlighted = self.apply_highlight(winner);
                            return SearchOutcome::RemoteMatch {
                                winner: winner.clone(),
                                reason: judgment.reason,
                                highlighted,
                            };
                        }
                        None => FallbackReason::IndexOutOfBounds { index },
                    }
                }
                Some(_) => FallbackReason::Declined,
                None => FallbackReason::NoJudgment,
            },
            Err(TransportError::RateLimited { retry_after_secs }) => {
                FallbackReason::RateLimited { retry_after_secs }
            }
            Err(TransportError::Unavailable(detail)) => FallbackReason::Upstream(detail),
        };

        debug!(?fallback, "remote path abandoned, ranking locally");
        let matches = rank_with(&candidates, query, self.top_n, self.min_score);
        if matches.is_empty() {
            return SearchOutcome::NotFound;
        }

        let highlighted = self.apply_highlight(&matches[0].candidate);
        SearchOutcome::LocalMatches {
            matches,
            fallback,
            highlighted,
        }
    }

    /// Highlights the winner, retrying through href resolution when the
    /// element handle went stale.
    fn apply_highlight(&self, candidate: &Candidate) -> bool {
        if let Some(handle) = candidate.element {
            if self.highlighter.highlight(handle) {
                return true;
            }
        }

        if let Some(href) = &candidate.href {
            if let Some(handle) = self.highlighter.resolve_href(href) {
                return self.highlighter.highlight(handle);
            }
        }

        debug!("highlight target could not be resolved");
        false
    }
}

impl<S, T, H> std::fmt::Debug for SearchController<S, T, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("top_n", &self.top_n)
            .field("min_score", &self.min_score)
            .finish()
    }
}

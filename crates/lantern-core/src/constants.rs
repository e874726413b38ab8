//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary limits from primary ones to avoid drift. The cap
//! ordering `MAX_EXTRACTED_CANDIDATES >= REMOTE_CANDIDATE_CAP >=
//! CACHE_KEY_CANDIDATES` is an invariant enforced by
//! [`Config::validate`](crate::config::Config::validate); a judgment index is
//! only ever honored against the truncated list the judge was shown.

/// Maximum candidates one page scan will produce.
pub const MAX_EXTRACTED_CANDIDATES: usize = 800;

/// Maximum candidates shown to the remote judge.
pub const REMOTE_CANDIDATE_CAP: usize = 80;

/// Candidates folded into the cache-key digest (order-preserving prefix).
pub const CACHE_KEY_CANDIDATES: usize = 60;

/// Characters of candidate text that participate in the dedup key.
pub const DEDUP_TEXT_PREFIX: usize = 60;

/// Cap on captured candidate text (and on prompt labels).
pub const CANDIDATE_TEXT_MAX_CHARS: usize = 240;

/// Results returned by the heuristic ranking path.
pub const DEFAULT_TOP_N: usize = 5;

/// Minimum heuristic score a result must reach to be returned.
pub const DEFAULT_MIN_SCORE: i32 = 8;

/// Heuristic score treated as full confidence for display purposes.
pub const CONFIDENCE_FULL_SCORE: i32 = 35;

/// Requests allowed per client within one rate window.
pub const DEFAULT_RATE_CEILING: u32 = 120;

/// Rate window length in seconds.
pub const DEFAULT_RATE_WINDOW_SECS: u64 = 60;

/// Judgment cache time-to-live in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30;

/// Output-token bound for the judge completion.
pub const JUDGE_MAX_TOKENS: u32 = 200;

/// How long the highlight outline stays applied before reverting.
pub const HIGHLIGHT_REVERT_MS: u64 = 2500;

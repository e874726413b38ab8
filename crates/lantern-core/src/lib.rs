//! Lantern library crate (used by the server and integration tests).
//!
//! Lantern finds the page element that best answers a free-text query. The
//! pipeline has three legs:
//!
//! - **Extraction**: [`extract`] scans a parsed page into [`Candidate`]
//!   records (links, buttons, headings) with structural region hints.
//! - **Ranking**: [`ranker`] runs the remote judge behind a per-client rate
//!   window and a short-TTL cache; [`scoring`] is the pure local heuristic
//!   used when the remote path is unavailable.
//! - **Orchestration**: [`search`] ties both legs together, remote-first
//!   with local fallback, and applies the highlight side effect.
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Gateway configuration
//! - [`Candidate`], [`ScoredCandidate`], [`ElementHandle`] - Candidate model
//! - [`RankService`], [`RankReply`] - The gateway pipeline
//! - [`SearchController`], [`SearchOutcome`] - The orchestrator
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod candidate;
pub mod config;
pub mod constants;
pub mod extract;
pub mod hashing;
pub mod judge;
pub mod ranker;
pub mod ratelimit;
pub mod relay;
pub mod scoring;
pub mod search;

pub use cache::{CachedJudgment, JudgmentCache};
pub use candidate::{Candidate, CandidateKind, ElementHandle, Region, ScoredCandidate};
pub use config::{Config, ConfigError};
pub use extract::{DomSource, ExtractOptions, LayoutProbe, PageDocument, Rect, scan};
pub use hashing::{hash_client_token, hash_rank_request};
pub use judge::{GenaiJudge, JudgeBackend, JudgeError, Judgment, parse_judgment};
#[cfg(any(test, feature = "mock"))]
pub use judge::MockJudge;
pub use ranker::{
    LANTERN_STATUS_HEADER, RankError, RankErrorBody, RankReply, RankRequestBody, RankResponseBody,
    RankService, STATUS_CACHED, STATUS_ERROR, STATUS_FRESH, STATUS_RATE_LIMITED, WireCandidate,
};
pub use ratelimit::{Clock, RateDecision, RateLimiter, SystemClock};
#[cfg(any(test, feature = "mock"))]
pub use ratelimit::ManualClock;
pub use relay::{HttpRelay, LocalTransport};
pub use scoring::{rank, rank_with, score};
pub use search::{
    CandidateSource, FallbackReason, Highlighter, RankTransport, SearchController, SearchOutcome,
    SourceError, TransportError,
};
#[cfg(any(test, feature = "mock"))]
pub use search::{RecordingHighlighter, StaticSource};

//! Local heuristic relevance scoring.
//!
//! [`score`] is a pure additive point heuristic over lexical overlap, domain
//! vocabulary, and page structure; [`rank`] thresholds and orders a candidate
//! list with it. This is the degraded fallback path behind the remote judge:
//! the two are never blended. The point values encode tuning; do not adjust
//! them without ground-truth relevance labels.

pub mod scorer;

#[cfg(test)]
mod tests;

pub use scorer::{KEYWORDS, rank, rank_with, score};

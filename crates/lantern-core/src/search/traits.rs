use async_trait::async_trait;
use thiserror::Error;

use crate::candidate::{Candidate, ElementHandle};
use crate::ranker::RankReply;

#[derive(Debug, Error)]
pub enum SourceError {
    /// The page (or whatever backs the source) could not be read at all.
    #[error("candidate source unreachable: {0}")]
    Unreachable(String),
}

/// Where candidates come from. The in-process implementation is
/// [`DomSource`](crate::extract::DomSource); embedders with a live renderer
/// supply their own.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn collect(&self, query: &str) -> Result<Vec<Candidate>, SourceError>;
}

/// Remote ranking failures, as the orchestrator sees them. Every variant
/// triggers the local fallback.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
    #[error("ranking backend unavailable: {0}")]
    Unavailable(String),
}

/// Path to the ranking gateway, in-process or over HTTP.
#[async_trait]
pub trait RankTransport: Send + Sync {
    async fn rank(
        &self,
        query: &str,
        candidates: &[Candidate],
    ) -> Result<RankReply, TransportError>;
}

/// Applies the visual highlight to a winning element.
///
/// `highlight` returns `false` when the handle no longer resolves, at which
/// point the orchestrator retries through `resolve_href`. Highlighting is a
/// side effect only; its failure never changes the search outcome.
/// Implementers outline the element, scroll it into view, and revert after
/// [`HIGHLIGHT_REVERT_MS`](crate::constants::HIGHLIGHT_REVERT_MS),
/// restoring whatever outline style the element carried before.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, handle: ElementHandle) -> bool;

    fn resolve_href(&self, href: &str) -> Option<ElementHandle>;
}

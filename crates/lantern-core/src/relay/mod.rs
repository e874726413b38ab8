//! Transports between the search orchestrator and the ranking gateway.
//!
//! [`HttpRelay`] speaks the `/v1/rank` wire protocol to a remote gateway;
//! [`LocalTransport`] runs the same pipeline in-process, for embedders that
//! host the gateway themselves.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use crate::candidate::Candidate;
use crate::judge::JudgeBackend;
use crate::ranker::{RankError, RankReply, RankRequestBody, RankResponseBody, WireCandidate};
use crate::ratelimit::{Clock, SystemClock};
use crate::search::{RankTransport, TransportError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP client for a remote ranking gateway.
pub struct HttpRelay {
    client: reqwest::Client,
    endpoint: String,
    bearer: Option<String>,
}

impl HttpRelay {
    /// Relay against `base_url` (no trailing slash needed).
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            endpoint: format!("{}/v1/rank", base_url.trim_end_matches('/')),
            bearer: None,
        }
    }

    /// Attaches a bearer token; the gateway keys its rate window off it.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

#[async_trait]
impl RankTransport for HttpRelay {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn rank(
        &self,
        query: &str,
        candidates: &[Candidate],
    ) -> Result<RankReply, TransportError> {
        let body = RankRequestBody {
            query: query.to_string(),
            candidates: candidates.iter().map(WireCandidate::from_candidate).collect(),
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| TransportError::Unavailable(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(TransportError::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            return Err(TransportError::Unavailable(format!(
                "gateway returned {status}"
            )));
        }

        let reply: RankResponseBody = response
            .json()
            .await
            .map_err(|err| TransportError::Unavailable(err.to_string()))?;

        Ok(RankReply {
            raw: reply.raw,
            judgment: reply.parsed,
            cached: reply.cached,
        })
    }
}

impl std::fmt::Debug for HttpRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRelay")
            .field("endpoint", &self.endpoint)
            .field("bearer", &self.bearer.is_some())
            .finish()
    }
}

/// In-process transport over a shared [`RankService`](crate::ranker::RankService).
#[derive(Debug)]
pub struct LocalTransport<J: JudgeBackend, C: Clock = SystemClock> {
    service: Arc<crate::ranker::RankService<J, C>>,
    client_id: u64,
}

impl<J: JudgeBackend, C: Clock> LocalTransport<J, C> {
    pub fn new(service: Arc<crate::ranker::RankService<J, C>>, client_id: u64) -> Self {
        Self { service, client_id }
    }
}

#[async_trait]
impl<J: JudgeBackend, C: Clock> RankTransport for LocalTransport<J, C> {
    async fn rank(
        &self,
        query: &str,
        candidates: &[Candidate],
    ) -> Result<RankReply, TransportError> {
        self.service
            .rank(self.client_id, query, candidates)
            .await
            .map_err(|err| match err {
                RankError::RateLimited { retry_after_secs } => {
                    TransportError::RateLimited { retry_after_secs }
                }
                other => TransportError::Unavailable(other.to_string()),
            })
    }
}

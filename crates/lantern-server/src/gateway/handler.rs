use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use lantern::candidate::Candidate;
use lantern::hashing::hash_client_token;
use lantern::judge::JudgeBackend;
use lantern::ranker::{
    LANTERN_STATUS_HEADER, RankRequestBody, RankResponseBody, STATUS_CACHED, STATUS_FRESH,
};

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;

/// `POST /v1/rank`: judge a query against a candidate roster.
///
/// The body is taken as a raw value first so shape errors come back as 400s
/// with a message, not axum's default rejection.
#[instrument(skip(state, headers, request))]
pub async fn rank_handler<J>(
    State(state): State<HandlerState<J>>,
    headers: HeaderMap,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    J: JudgeBackend + 'static,
{
    let body = validate_request_shape(&request)?;
    let client_id = client_id_from_headers(&headers);

    let candidates: Vec<Candidate> = body
        .candidates
        .into_iter()
        .map(|wire| wire.into_candidate())
        .collect();

    debug!(candidates = candidates.len(), "rank request accepted");

    let reply = state
        .service
        .rank(client_id, &body.query, &candidates)
        .await?;

    let status_value = if reply.cached {
        STATUS_CACHED
    } else {
        STATUS_FRESH
    };
    let mut response_headers = HeaderMap::new();
    response_headers.insert(LANTERN_STATUS_HEADER, HeaderValue::from_static(status_value));

    Ok((
        StatusCode::OK,
        response_headers,
        Json(RankResponseBody {
            ok: true,
            cached: reply.cached,
            raw: reply.raw,
            parsed: reply.judgment,
        }),
    )
        .into_response())
}

/// Checks the request shape before decoding: `query` must be a non-empty
/// string and `candidates` must be an array.
fn validate_request_shape(request: &serde_json::Value) -> Result<RankRequestBody, GatewayError> {
    let query_ok = request
        .get("query")
        .and_then(|q| q.as_str())
        .is_some_and(|q| !q.trim().is_empty());
    if !query_ok {
        return Err(GatewayError::InvalidRequest(
            "'query' must be a non-empty string".to_string(),
        ));
    }

    if !request.get("candidates").is_some_and(|c| c.is_array()) {
        return Err(GatewayError::InvalidRequest(
            "'candidates' must be an array".to_string(),
        ));
    }

    serde_json::from_value(request.clone())
        .map_err(|e| GatewayError::InvalidRequest(format!("invalid request schema: {e}")))
}

/// Rate-window identity: the hashed bearer token, or the shared anonymous
/// bucket when no token is sent.
fn client_id_from_headers(headers: &HeaderMap) -> u64 {
    let token = headers
        .get("Authorization")
        .and_then(|val| val.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("default");
    hash_client_token(token)
}

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use lantern::ranker::{
    LANTERN_STATUS_HEADER, RankError, RankErrorBody, STATUS_ERROR, STATUS_RATE_LIMITED,
};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("upstream judge failed: {0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RankError> for GatewayError {
    fn from(err: RankError) -> Self {
        match err {
            RankError::EmptyQuery => GatewayError::InvalidRequest(err.to_string()),
            RankError::RateLimited { retry_after_secs } => {
                GatewayError::RateLimited { retry_after_secs }
            }
            RankError::Upstream(detail) => GatewayError::Upstream(detail),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, lantern_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, STATUS_ERROR),
            GatewayError::RateLimited { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, STATUS_RATE_LIMITED)
            }
            GatewayError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, STATUS_ERROR),
            GatewayError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, STATUS_ERROR),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            LANTERN_STATUS_HEADER,
            HeaderValue::from_static(lantern_status),
        );
        if let GatewayError::RateLimited { retry_after_secs } = &self {
            headers.insert(
                axum::http::header::RETRY_AFTER,
                HeaderValue::from_str(&retry_after_secs.to_string())
                    .unwrap_or(HeaderValue::from_static("1")),
            );
        }

        let body = Json(RankErrorBody::new(self.to_string()));
        (status, headers, body).into_response()
    }
}

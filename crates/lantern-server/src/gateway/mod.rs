//! HTTP gateway (Axum) for the ranking service.
//!
//! This module is primarily used by the `lantern` server binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use handler::rank_handler;
pub use state::HandlerState;

use lantern::config::credential_env_for_model;
use lantern::judge::JudgeBackend;
use lantern::ranker::LANTERN_STATUS_HEADER;

pub fn create_router_with_state<J>(state: HandlerState<J>) -> Router
where
    J: JudgeBackend + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/rank", post(rank_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub judge: &'static str,
    pub cache: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(LANTERN_STATUS_HEADER, HeaderValue::from_static("ok"));

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<J>(State(state): State<HandlerState<J>>) -> Response
where
    J: JudgeBackend + 'static,
{
    // The judge is "ready" when its provider credential is present, or the
    // provider is unknown and left to fail at call time.
    let judge_status = match credential_env_for_model(&state.judge_model) {
        Some(name) if std::env::var(name).is_err() => "pending",
        _ => "ready",
    };

    let components = ComponentStatus {
        http: "ready",
        judge: judge_status,
        cache: "ready",
    };

    let is_ready = components.judge == "ready";
    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status_msg = if is_ready { "ok" } else { "pending" };

    let mut headers = HeaderMap::new();
    headers.insert(
        LANTERN_STATUS_HEADER,
        HeaderValue::from_str(status_msg).unwrap_or(HeaderValue::from_static("error")),
    );

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}

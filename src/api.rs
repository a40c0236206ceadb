// src/api.rs
//! Public HTTP surface: health ping, winners feed, idea generation.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::ideas::{self, DynIdeaProvider, IdeasResponse};
use crate::winners::WinnersService;

/// Request bodies are capped to this many characters before validation.
const MAX_QUERY_CHARS: usize = 2000;

#[derive(Clone)]
pub struct AppState {
    pub winners: Arc<WinnersService>,
    pub ideas: DynIdeaProvider,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/winners", get(winners))
        .route("/api/ideas", post(generate_ideas))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct PingResponse {
    message: String,
}

async fn ping() -> Json<PingResponse> {
    let message = std::env::var("PING_MESSAGE").unwrap_or_else(|_| "ping".to_string());
    Json(PingResponse { message })
}

async fn winners(State(state): State<AppState>) -> Response {
    match state.winners.get_or_refresh().await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => {
            tracing::error!(error = ?e, "winners pipeline failed unexpectedly");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch winners" })),
            )
                .into_response()
        }
    }
}

#[derive(serde::Deserialize)]
struct IdeasRequest {
    #[serde(default)]
    query: String,
}

async fn generate_ideas(
    State(state): State<AppState>,
    Json(body): Json<IdeasRequest>,
) -> Response {
    let query: String = body.query.chars().take(MAX_QUERY_CHARS).collect();
    let query = query.trim();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing query" })),
        )
            .into_response();
    }

    if let Some(items) = state.ideas.generate(query).await {
        return Json(IdeasResponse {
            ideas: items,
            provider: state.ideas.name().to_string(),
        })
        .into_response();
    }

    Json(IdeasResponse {
        ideas: ideas::rules::generate(query),
        provider: "rules".to_string(),
    })
    .into_response()
}

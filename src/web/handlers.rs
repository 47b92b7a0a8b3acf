//! HTTP request handlers

use super::state::AppState;
use crate::results::SearchResults;
use crate::search::{SearchMode, SearchQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

/// Query parameters for media search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    /// Profile scope
    pub pid: Option<String>,
}

/// Query parameters for profile lookup
#[derive(Debug, Deserialize)]
pub struct ProfileParams {
    pub q: Option<String>,
}

/// Media search handler: `/search/:mode?q=...&pid=...`
pub async fn search(
    State(state): State<AppState>,
    Path(mode): Path<String>,
    Query(params): Query<SearchParams>,
) -> Response {
    let mode: SearchMode = match mode.parse() {
        Ok(mode) => mode,
        Err(e) => {
            return (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": e.to_string() })))
                .into_response()
        }
    };

    let raw_query = match params.q {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Json(SearchResults::<Vec<()>>::empty()).into_response(),
    };

    let mut query = SearchQuery::new(raw_query).with_mode(mode);
    if let Some(pid) = params.pid {
        query = query.with_pid(pid);
    }

    Json(state.aggregator.search(&query).await).into_response()
}

/// Profile lookup handler: `/profiles?q=...`
pub async fn profiles(
    State(state): State<AppState>,
    Query(params): Query<ProfileParams>,
) -> impl IntoResponse {
    let substring = params.q.unwrap_or_default();
    Json(state.profiles.search(&substring).await)
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "instance": state.instance_name(),
        "version": crate::VERSION
    }))
}

/// Provider statistics handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let modes: serde_json::Map<String, serde_json::Value> = SearchMode::ALL
        .iter()
        .map(|mode| {
            (
                mode.to_string(),
                serde_json::json!(state.aggregator.modes().names(*mode)),
            )
        })
        .collect();

    Json(serde_json::json!({
        "total_searches": state.metrics.get_total_searches(),
        "timeout_ms": state.aggregator.timeout().as_millis() as u64,
        "modes": modes,
        "providers": state.metrics.get_provider_stats(),
    }))
}

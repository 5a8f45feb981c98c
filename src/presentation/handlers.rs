// HTTP request handlers
use crate::domain::dashboard::{Action, DashboardSnapshot};
use crate::domain::landing::InfoMessage;
use crate::infrastructure::error::DashboardError;
use crate::infrastructure::snapshot_stream::snapshot_sse;
use crate::presentation::app_state::AppState;
use crate::presentation::page::INDEX_HTML;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse},
    Json,
};
use std::sync::Arc;

/// Browser shell; everything it shows comes from the snapshot API
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_snapshot(State(state): State<Arc<AppState>>) -> Json<Arc<DashboardSnapshot>> {
    Json(state.dashboard.snapshot())
}

/// Apply one action and return the snapshot it produced
pub async fn post_action(
    State(state): State<Arc<AppState>>,
    Json(action): Json<Action>,
) -> Result<Json<Arc<DashboardSnapshot>>, DashboardError> {
    let snapshot = state.dashboard.dispatch(action).await?;
    Ok(Json(snapshot))
}

/// Live snapshots as server-sent events
pub async fn stream_snapshots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    snapshot_sse(state.dashboard.subscribe())
}

/// Informational landing topics; no state change
pub async fn get_info(
    Path(topic): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<InfoMessage>, DashboardError> {
    state.dashboard.info(&topic).map(Json)
}

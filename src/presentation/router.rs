// Route table
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_info, get_snapshot, health_check, index, post_action, stream_snapshots,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/api/snapshot", get(get_snapshot))
        .route("/api/actions", post(post_action))
        .route("/api/stream", get(stream_snapshots))
        .route("/api/info/:topic", get(get_info))
        // SSE responses are skipped by the default compression predicate.
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

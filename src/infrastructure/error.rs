// Error types for configuration and the dashboard service edges
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chart.tick_interval_secs must be greater than zero")]
    ZeroTickInterval,
    #[error("chart.labels must not be empty")]
    EmptySeries,
    #[error("chart has {labels} labels but {values} initial values")]
    SeriesLengthMismatch { labels: usize, values: usize },
    #[error("chart bounds and initial values must be finite numbers")]
    NonFinite,
    #[error("chart.min ({min}) is greater than chart.max ({max})")]
    InvertedClamp { min: f64, max: f64 },
    #[error("chart.jitter must not be negative, got {0}")]
    NegativeJitter(f64),
    #[error("forecast range [{low}, {high}) is empty")]
    EmptyForecastRange { low: f64, high: f64 },
    #[error("{field} span is too wide to sample")]
    RangeOverflow { field: &'static str },
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dashboard state owner is not running")]
    Unavailable,
    #[error("unknown info topic: {0}")]
    UnknownTopic(String),
}

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::UnknownTopic(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        tracing::warn!("Request failed: {}", self);
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for DashboardError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        DashboardError::Unavailable
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for DashboardError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        DashboardError::Unavailable
    }
}

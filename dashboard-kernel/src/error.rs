use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::{MetricType, TimeRange};

/// Erreurs métier renvoyées par les handlers.
/// Le message Display est exactement le `detail` vu par le client.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("User not found")]
    UserNotFound(String),
    #[error("Invalid metric type. Must be one of: {}", MetricType::valid_values())]
    InvalidMetricType(String),
    #[error("Invalid time range. Must be one of: {}", TimeRange::valid_values())]
    InvalidTimeRange(String),
}

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::UserNotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::InvalidMetricType(_) | DashboardError::InvalidTimeRange(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            DashboardError::UserNotFound(id) => tracing::debug!(user_id = %id, "unknown user"),
            DashboardError::InvalidMetricType(raw) => tracing::warn!(metric_type = %raw, "rejected metric type"),
            DashboardError::InvalidTimeRange(raw) => tracing::warn!(time_range = %raw, "rejected time range"),
        }
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

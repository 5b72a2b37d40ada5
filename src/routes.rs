use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::AppState;
use crate::store::TelemetryError;

#[derive(Deserialize)]
pub struct HeartbeatRequest {
    sent_at: String,
}

#[derive(Deserialize)]
pub struct StatsRequest {
    sent_at: String,
    /// Upload duration in nanoseconds.
    upload_time: i64,
}

#[derive(Serialize)]
pub struct StatsResponse {
    uptime: f64,
    avg_upload_time: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    code: u16,
    message: String,
}

// Status mapping is decided here, not in the store: unknown device is 404,
// malformed input is the client's fault and gets 400.
impl IntoResponse for TelemetryError {
    fn into_response(self) -> Response {
        let status = match self {
            TelemetryError::DeviceNotFound => StatusCode::NOT_FOUND,
            TelemetryError::InvalidTimestamp | TelemetryError::InvalidStats => {
                StatusCode::BAD_REQUEST
            }
        };
        let body = ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn ping() -> &'static str {
    "pong"
}

pub async fn record_heartbeat(
    State(state): State<Arc<AppState>>,
    Path(device_id): Path<String>,
    Json(data): Json<HeartbeatRequest>,
) -> Result<StatusCode, TelemetryError> {
    debug!(%device_id, sent_at = %data.sent_at, "heartbeat received");
    let mut store = state.store.write().unwrap();
    store.record_heartbeat(&device_id, &data.sent_at)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn record_stats(
    State(state): State<Arc<AppState>>,
    Path(device_id): Path<String>,
    Json(data): Json<StatsRequest>,
) -> Result<StatusCode, TelemetryError> {
    debug!(
        %device_id,
        sent_at = %data.sent_at,
        upload_time = data.upload_time,
        "stats received"
    );
    let mut store = state.store.write().unwrap();
    store.record_stats(&device_id, &data.sent_at, data.upload_time)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(device_id): Path<String>,
) -> Result<Json<StatsResponse>, TelemetryError> {
    let store = state.store.read().unwrap();
    let metrics = store.device_metrics(&device_id)?;
    Ok(Json(StatsResponse {
        uptime: metrics.uptime,
        avg_upload_time: metrics.avg_upload_time,
    }))
}

//! Dashboard API route handlers.
//!
//! Read endpoints return JSON snapshots of the session. The two control
//! endpoints flip session flags and wake the simulator.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{LOCATIONS, THREATS};
use crate::session::Session;
use crate::types::{
    ControlError, CounterPoint, LedgerEntry, Location, MapView, Metrics, Notification, Threat,
};

pub type AppState = Arc<Session>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub attack_in_progress: bool,
    pub auto_mode: bool,
    pub current_attack_count: f64,
    pub cycles_started: u64,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub threats: &'static [Threat],
    pub locations: &'static [Location],
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlResponse {
    pub attack_in_progress: bool,
    pub auto_mode: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutoModeRequest {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// A control action rejected because of the current session state.
#[derive(Debug)]
pub struct ApiError(ControlError);

impl From<ControlError> for ApiError {
    fn from(err: ControlError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.0.code().to_string(),
            message: self.0.to_string(),
        };
        (StatusCode::CONFLICT, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let session = state.state.read().await;
    Json(StatusResponse {
        attack_in_progress: session.attack_in_progress,
        auto_mode: session.auto_mode,
        current_attack_count: session.current_attack_count,
        cycles_started: session.cycles_started,
        metrics: session.metrics(),
    })
}

/// GET /api/metrics
pub async fn get_metrics(State(state): State<AppState>) -> Json<Metrics> {
    Json(state.state.read().await.metrics())
}

/// GET /api/ledger
pub async fn get_ledger(State(state): State<AppState>) -> Json<Vec<LedgerEntry>> {
    Json(state.state.read().await.ledger.clone())
}

/// GET /api/attack-series
pub async fn get_attack_series(State(state): State<AppState>) -> Json<Vec<CounterPoint>> {
    let session = state.state.read().await;
    Json(session.attack_counts.iter().copied().collect())
}

/// GET /api/map
pub async fn get_map(State(state): State<AppState>) -> Json<MapView> {
    Json(state.state.read().await.map.clone())
}

/// GET /api/notifications
pub async fn get_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    let session = state.state.read().await;
    Json(session.notifications.iter().cloned().collect())
}

/// GET /api/catalog
pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        threats: &THREATS,
        locations: &LOCATIONS,
    })
}

/// POST /api/attack
pub async fn launch_attack(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ControlResponse>), ApiError> {
    state.launch_manual().await?;
    Ok((StatusCode::ACCEPTED, Json(control_response(&state).await)))
}

/// POST /api/auto-mode
pub async fn set_auto_mode(
    State(state): State<AppState>,
    Json(request): Json<AutoModeRequest>,
) -> Json<ControlResponse> {
    state.set_auto_mode(request.enabled).await;
    Json(control_response(&state).await)
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

async fn control_response(state: &AppState) -> ControlResponse {
    let session = state.state.read().await;
    ControlResponse {
        attack_in_progress: session.attack_in_progress,
        auto_mode: session.auto_mode,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

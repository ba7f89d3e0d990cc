//! Handlers for the health dashboard endpoints.
//!
//! Each handler takes a fresh snapshot from the registry and runs the pure
//! engine in `fleetpulse_core::health` over it with a single `now`. Nothing
//! is cached between requests.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use fleetpulse_core::health;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
///
/// Headline aggregation: counts, percentages, system status, alert summary.
pub async fn general_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let devices = state.registry.list_all().await;
    let stats = health::dashboard_stats(&devices, Utc::now());
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/dashboard/stats/by-status
pub async fn stats_by_status(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let devices = state.registry.list_all().await;
    let distribution = health::status_distribution(&devices);
    Ok(Json(DataResponse { data: distribution }))
}

/// GET /api/v1/dashboard/stats/by-type
pub async fn stats_by_type(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let devices = state.registry.list_all().await;
    let distribution = health::type_distribution(&devices);
    Ok(Json(DataResponse { data: distribution }))
}

/// GET /api/v1/dashboard/stats/connectivity
pub async fn connectivity(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let devices = state.registry.list_all().await;
    let stats = health::connectivity_stats(&devices, Utc::now());
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/dashboard/alerts
///
/// Ranked list of devices needing attention, critical first.
pub async fn active_alerts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let devices = state.registry.list_all().await;
    let alerts = health::active_alerts(&devices, Utc::now());
    Ok(Json(DataResponse { data: alerts }))
}

//! Handlers for device registry CRUD and lookup endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use fleetpulse_core::device::{Device, DeviceDraft, DeviceStatus, DeviceType, DeviceUpdate};
use fleetpulse_core::error::CoreError;
use fleetpulse_core::types::{DbId, Timestamp};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Device payload returned by the API: the stored record plus the computed
/// 5-minute online flag.
#[derive(Debug, Serialize)]
pub struct DeviceResponse {
    #[serde(flatten)]
    pub device: Device,
    pub is_online: bool,
}

impl DeviceResponse {
    fn new(device: Device, now: Timestamp) -> Self {
        let is_online = device.is_online(now);
        Self { device, is_online }
    }

    fn many(devices: Vec<Device>, now: Timestamp) -> Vec<Self> {
        devices.into_iter().map(|d| Self::new(d, now)).collect()
    }
}

/// PATCH body for `/{id}/communication`. The whole body is optional.
#[derive(Debug, Deserialize)]
pub struct CommunicationPayload {
    /// Sensor reading reported with the heartbeat.
    pub reading: Option<String>,
}

/// Run `validator` checks and surface failures as a 400 VALIDATION_ERROR.
fn validated<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/devices
///
/// Register a new device. 409 on duplicate name or identifier.
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<DeviceDraft>,
) -> AppResult<impl IntoResponse> {
    validated(&draft)?;

    let device = state.registry.create(draft).await?;
    let response = DeviceResponse::new(device, Utc::now());

    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/v1/devices
pub async fn list_all(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let devices = state.registry.list_all().await;
    let data = DeviceResponse::many(devices, Utc::now());
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/devices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let device = state.registry.get(id).await?;
    Ok(Json(DataResponse {
        data: DeviceResponse::new(device, Utc::now()),
    }))
}

/// PUT /api/v1/devices/{id}
///
/// Full-field replacement; the hardware identifier is immutable.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(payload): Json<DeviceUpdate>,
) -> AppResult<impl IntoResponse> {
    validated(&payload)?;

    let device = state.registry.update(id, payload).await?;
    Ok(Json(DataResponse {
        data: DeviceResponse::new(device, Utc::now()),
    }))
}

/// DELETE /api/v1/devices/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.registry.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// GET /api/v1/devices/type/{type}
pub async fn list_by_type(
    State(state): State<AppState>,
    Path(device_type): Path<DeviceType>,
) -> AppResult<impl IntoResponse> {
    let devices = state.registry.by_type(device_type).await;
    Ok(Json(DataResponse {
        data: DeviceResponse::many(devices, Utc::now()),
    }))
}

/// GET /api/v1/devices/status/{status}
pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<DeviceStatus>,
) -> AppResult<impl IntoResponse> {
    let devices = state.registry.by_status(status).await;
    Ok(Json(DataResponse {
        data: DeviceResponse::many(devices, Utc::now()),
    }))
}

/// GET /api/v1/devices/online
pub async fn list_online(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let devices = state.registry.online(now).await;
    Ok(Json(DataResponse {
        data: DeviceResponse::many(devices, now),
    }))
}

/// GET /api/v1/devices/offline
pub async fn list_offline(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let devices = state.registry.offline(now).await;
    Ok(Json(DataResponse {
        data: DeviceResponse::many(devices, now),
    }))
}

// ---------------------------------------------------------------------------
// Heartbeat
// ---------------------------------------------------------------------------

/// PATCH /api/v1/devices/{id}/communication
///
/// Stamps the device's last communication and optionally stores a reading.
pub async fn record_communication(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Option<Json<CommunicationPayload>>,
) -> AppResult<impl IntoResponse> {
    let reading = payload.and_then(|Json(p)| p.reading);

    let device = state.registry.record_communication(id, reading).await?;
    Ok(Json(DataResponse {
        data: DeviceResponse::new(device, Utc::now()),
    }))
}

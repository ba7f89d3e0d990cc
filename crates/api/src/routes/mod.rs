pub mod dashboard;
pub mod devices;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /devices                            list, register
/// /devices/{id}                       get, update, delete
/// /devices/{id}/communication         heartbeat (PATCH)
/// /devices/type/{type}                filter by device type
/// /devices/status/{status}            filter by status
/// /devices/online                     5-minute online predicate
/// /devices/offline                    complement of /online
///
/// /dashboard/stats                    headline aggregation
/// /dashboard/stats/by-status          status distribution
/// /dashboard/stats/by-type            type distribution
/// /dashboard/stats/connectivity       multi-window connectivity metrics
/// /dashboard/alerts                   ranked active alerts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/devices", devices::router())
        .nest("/dashboard", dashboard::router())
}

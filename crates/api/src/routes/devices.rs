//! Route definitions for the device registry.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::devices;
use crate::state::AppState;

/// Routes mounted at `/devices`.
///
/// ```text
/// GET    /                      -> list_all
/// POST   /                      -> create
/// GET    /online                -> list_online
/// GET    /offline               -> list_offline
/// GET    /type/{type}           -> list_by_type
/// GET    /status/{status}       -> list_by_status
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// PATCH  /{id}/communication    -> record_communication
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(devices::list_all).post(devices::create))
        .route("/online", get(devices::list_online))
        .route("/offline", get(devices::list_offline))
        .route("/type/{type}", get(devices::list_by_type))
        .route("/status/{status}", get(devices::list_by_status))
        .route(
            "/{id}",
            get(devices::get_by_id)
                .put(devices::update)
                .delete(devices::delete),
        )
        .route("/{id}/communication", patch(devices::record_communication))
}

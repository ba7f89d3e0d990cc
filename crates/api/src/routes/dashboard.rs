//! Route definitions for the health dashboard.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /stats                  -> general_stats
/// GET /stats/by-status        -> stats_by_status
/// GET /stats/by-type          -> stats_by_type
/// GET /stats/connectivity     -> connectivity
/// GET /alerts                 -> active_alerts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard::general_stats))
        .route("/stats/by-status", get(dashboard::stats_by_status))
        .route("/stats/by-type", get(dashboard::stats_by_type))
        .route("/stats/connectivity", get(dashboard::connectivity))
        .route("/alerts", get(dashboard::active_alerts))
}

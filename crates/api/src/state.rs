use std::sync::Arc;

use fleetpulse_registry::DeviceRegistry;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory device registry.
    pub registry: Arc<DeviceRegistry>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

//! In-memory device registry.
//!
//! The registry owns device records and hands out stable snapshots; all
//! health computation lives in `fleetpulse_core::health` and consumes
//! those snapshots read-only. Reads clone the stored records, so a
//! computation never observes a half-applied mutation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use fleetpulse_core::device::{Device, DeviceDraft, DeviceStatus, DeviceType, DeviceUpdate};
use fleetpulse_core::error::CoreError;
use fleetpulse_core::types::{DbId, Timestamp};

/// Thread-safe device store keyed by id.
///
/// Ids are handed out sequentially starting at 1 and never reused within
/// a process lifetime.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: RwLock<HashMap<DbId, Device>>,
    next_id: AtomicI64,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new device. Name and hardware identifier must both be
    /// unique across the registry.
    ///
    /// New devices start `Inactive` with no communication history.
    pub async fn create(&self, draft: DeviceDraft) -> Result<Device, CoreError> {
        let mut devices = self.devices.write().await;

        if devices.values().any(|d| d.identifier == draft.identifier) {
            return Err(CoreError::Conflict(format!(
                "a device with identifier '{}' already exists",
                draft.identifier
            )));
        }
        if devices.values().any(|d| d.name == draft.name) {
            return Err(CoreError::Conflict(format!(
                "a device named '{}' already exists",
                draft.name
            )));
        }

        let now = Utc::now();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let device = Device {
            id,
            name: draft.name,
            identifier: draft.identifier,
            device_type: draft.device_type,
            status: DeviceStatus::Inactive,
            description: draft.description,
            location: draft.location,
            latitude: draft.latitude,
            longitude: draft.longitude,
            last_reading: None,
            last_communication: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        devices.insert(id, device.clone());
        tracing::info!(device_id = id, name = %device.name, "Device registered");

        Ok(device)
    }

    /// Full snapshot of every device, ordered by id so callers see a
    /// deterministic iteration order.
    pub async fn list_all(&self) -> Vec<Device> {
        let devices = self.devices.read().await;
        let mut all: Vec<Device> = devices.values().cloned().collect();
        all.sort_by_key(|d| d.id);
        all
    }

    pub async fn count(&self) -> usize {
        self.devices.read().await.len()
    }

    pub async fn get(&self, id: DbId) -> Result<Device, CoreError> {
        self.devices
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "device",
                id,
            })
    }

    pub async fn by_type(&self, device_type: DeviceType) -> Vec<Device> {
        self.filtered(|d| d.device_type == device_type).await
    }

    pub async fn by_status(&self, status: DeviceStatus) -> Vec<Device> {
        self.filtered(|d| d.status == status).await
    }

    /// Devices that communicated within the 5-minute online window.
    pub async fn online(&self, now: Timestamp) -> Vec<Device> {
        self.filtered(|d| d.is_online(now)).await
    }

    /// Complement of [`DeviceRegistry::online`], never-communicated included.
    pub async fn offline(&self, now: Timestamp) -> Vec<Device> {
        self.filtered(|d| !d.is_online(now)).await
    }

    /// Replace the mutable fields of a device. The new name must not
    /// collide with any other device.
    pub async fn update(&self, id: DbId, update: DeviceUpdate) -> Result<Device, CoreError> {
        let mut devices = self.devices.write().await;

        if devices.values().any(|d| d.id != id && d.name == update.name) {
            return Err(CoreError::Conflict(format!(
                "a device named '{}' already exists",
                update.name
            )));
        }

        let device = devices.get_mut(&id).ok_or(CoreError::NotFound {
            entity: "device",
            id,
        })?;

        device.name = update.name;
        device.device_type = update.device_type;
        device.status = update.status;
        device.description = update.description;
        device.location = update.location;
        device.latitude = update.latitude;
        device.longitude = update.longitude;
        device.last_reading = update.last_reading;
        device.is_active = update.is_active;
        device.updated_at = Utc::now();

        tracing::info!(device_id = id, status = ?device.status, "Device updated");

        Ok(device.clone())
    }

    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        let mut devices = self.devices.write().await;
        devices.remove(&id).ok_or(CoreError::NotFound {
            entity: "device",
            id,
        })?;

        tracing::info!(device_id = id, "Device removed");
        Ok(())
    }

    /// Stamp a heartbeat: set `last_communication` to now and optionally
    /// replace the last reading. Blank readings are ignored.
    pub async fn record_communication(
        &self,
        id: DbId,
        reading: Option<String>,
    ) -> Result<Device, CoreError> {
        let mut devices = self.devices.write().await;

        let device = devices.get_mut(&id).ok_or(CoreError::NotFound {
            entity: "device",
            id,
        })?;

        let now = Utc::now();
        device.last_communication = Some(now);
        if let Some(reading) = reading.filter(|r| !r.trim().is_empty()) {
            device.last_reading = Some(reading);
        }
        device.updated_at = now;

        tracing::debug!(device_id = id, "Device communication recorded");

        Ok(device.clone())
    }

    async fn filtered(&self, keep: impl Fn(&Device) -> bool) -> Vec<Device> {
        let devices = self.devices.read().await;
        let mut matched: Vec<Device> = devices.values().filter(|d| keep(d)).cloned().collect();
        matched.sort_by_key(|d| d.id);
        matched
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

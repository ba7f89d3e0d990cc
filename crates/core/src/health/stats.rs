//! Dashboard statistics aggregation.

use std::collections::{BTreeMap, HashSet};

use chrono::Duration;
use serde::Serialize;

use crate::device::{Device, DeviceStatus, DeviceType, ONLINE_WINDOW_MINUTES};
use crate::types::Timestamp;

use super::alerts::{active_alerts, AlertSeverity};
use super::{count_online_since, percentage};

/// Overall system health classification shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemStatus {
    /// No devices registered yet.
    NoData,
    /// More than 10% of devices are in error status.
    Critical,
    /// Fewer than 70% of devices are online.
    Warning,
    /// At least 90% of devices are online.
    Excellent,
    Healthy,
}

/// Headline numbers for the dashboard, recomputed on every request.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_devices: i64,
    /// Devices that communicated within the 5-minute online window.
    pub online_devices: i64,
    pub offline_devices: i64,
    /// One entry per [`DeviceStatus`] variant; absent statuses count zero.
    pub status_counts: BTreeMap<DeviceStatus, i64>,
    pub online_percentage: f64,
    /// Share of devices in `Active` status.
    pub availability_percentage: f64,
    /// Distinct device types present in the snapshot.
    pub total_device_types: i64,
    pub last_updated: Timestamp,
    pub system_status: SystemStatus,
    pub has_critical_alerts: bool,
    pub active_alerts: i64,
}

/// Aggregate a device snapshot into [`DashboardStats`].
pub fn dashboard_stats(devices: &[Device], now: Timestamp) -> DashboardStats {
    if devices.is_empty() {
        return empty_stats(now);
    }

    let total = devices.len();
    let online = count_online_since(devices, now - Duration::minutes(ONLINE_WINDOW_MINUTES));
    let offline = total - online;

    // Seed every status with zero so missing ones never need a branch.
    let mut status_counts: BTreeMap<DeviceStatus, i64> =
        DeviceStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for device in devices {
        *status_counts.entry(device.status).or_default() += 1;
    }

    let active = status_counts.get(&DeviceStatus::Active).copied().unwrap_or(0);
    let errors = status_counts.get(&DeviceStatus::Error).copied().unwrap_or(0);

    let online_percentage = percentage(online, total);
    let availability_percentage = percentage(active as usize, total);

    let distinct_types: HashSet<DeviceType> = devices.iter().map(|d| d.device_type).collect();

    let alerts = active_alerts(devices, now);
    let has_critical_alerts = alerts.iter().any(|a| a.severity == AlertSeverity::Critical);

    DashboardStats {
        total_devices: total as i64,
        online_devices: online as i64,
        offline_devices: offline as i64,
        status_counts,
        online_percentage,
        availability_percentage,
        total_device_types: distinct_types.len() as i64,
        last_updated: now,
        system_status: classify_system_status(online_percentage, errors, total as i64),
        has_critical_alerts,
        active_alerts: alerts.len() as i64,
    }
}

/// System status rules, first match wins.
fn classify_system_status(
    online_percentage: f64,
    error_devices: i64,
    total_devices: i64,
) -> SystemStatus {
    if error_devices as f64 > total_devices as f64 * 0.1 {
        SystemStatus::Critical
    } else if online_percentage < 70.0 {
        SystemStatus::Warning
    } else if online_percentage >= 90.0 {
        SystemStatus::Excellent
    } else {
        SystemStatus::Healthy
    }
}

fn empty_stats(now: Timestamp) -> DashboardStats {
    DashboardStats {
        total_devices: 0,
        online_devices: 0,
        offline_devices: 0,
        status_counts: DeviceStatus::ALL.iter().map(|s| (*s, 0)).collect(),
        online_percentage: 0.0,
        availability_percentage: 0.0,
        total_device_types: 0,
        last_updated: now,
        system_status: SystemStatus::NoData,
        has_critical_alerts: false,
        active_alerts: 0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Device records and the closed status/type enumerations.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

/// A device counts as online when its last communication falls within
/// this many minutes of `now`.
pub const ONLINE_WINDOW_MINUTES: i64 = 5;

/// Kinds of devices the platform tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    /// GPS/GNSS location trackers.
    Tracker,
    TemperatureSensor,
    VibrationSensor,
    OxygenMeter,
    HumiditySensor,
    PressureSensor,
    /// Anything that does not fit one of the specific categories.
    Generic,
}

impl DeviceType {
    /// Every variant, for enumeration-keyed grouping.
    pub const ALL: [DeviceType; 7] = [
        DeviceType::Tracker,
        DeviceType::TemperatureSensor,
        DeviceType::VibrationSensor,
        DeviceType::OxygenMeter,
        DeviceType::HumiditySensor,
        DeviceType::PressureSensor,
        DeviceType::Generic,
    ];

    /// Canonical wire name (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Tracker => "TRACKER",
            DeviceType::TemperatureSensor => "TEMPERATURE_SENSOR",
            DeviceType::VibrationSensor => "VIBRATION_SENSOR",
            DeviceType::OxygenMeter => "OXYGEN_METER",
            DeviceType::HumiditySensor => "HUMIDITY_SENSOR",
            DeviceType::PressureSensor => "PRESSURE_SENSOR",
            DeviceType::Generic => "GENERIC",
        }
    }
}

/// Lifecycle state reported by the device management subsystem.
///
/// Independent of the online predicate: a device can be `Active` yet not
/// have communicated recently, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    Active,
    Inactive,
    Maintenance,
    Error,
    Offline,
    Configuring,
}

impl DeviceStatus {
    /// Every variant, for enumeration-keyed grouping.
    pub const ALL: [DeviceStatus; 6] = [
        DeviceStatus::Active,
        DeviceStatus::Inactive,
        DeviceStatus::Maintenance,
        DeviceStatus::Error,
        DeviceStatus::Offline,
        DeviceStatus::Configuring,
    ];

    /// Canonical wire name (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "ACTIVE",
            DeviceStatus::Inactive => "INACTIVE",
            DeviceStatus::Maintenance => "MAINTENANCE",
            DeviceStatus::Error => "ERROR",
            DeviceStatus::Offline => "OFFLINE",
            DeviceStatus::Configuring => "CONFIGURING",
        }
    }
}

/// A registered IoT device.
///
/// The health engine only ever reads these records; creation and mutation
/// belong to the registry.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    pub id: DbId,
    /// Unique human-readable name.
    pub name: String,
    /// Unique hardware identifier (MAC, IMEI, serial, ...).
    pub identifier: String,
    pub device_type: DeviceType,
    pub status: DeviceStatus,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Most recent reported sensor value, verbatim.
    pub last_reading: Option<String>,
    /// `None` means the device has never communicated.
    pub last_communication: Option<Timestamp>,
    /// Administrative flag, independent of `status`.
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Device {
    /// Whether the device communicated strictly after `cutoff`.
    ///
    /// Devices that never communicated are offline for every cutoff.
    pub fn online_since(&self, cutoff: Timestamp) -> bool {
        self.last_communication.is_some_and(|at| at > cutoff)
    }

    /// The 5-minute online predicate used across the dashboard.
    pub fn is_online(&self, now: Timestamp) -> bool {
        self.online_since(now - Duration::minutes(ONLINE_WINDOW_MINUTES))
    }
}

/// Payload for registering a new device.
///
/// New devices always start `Inactive` with no communication history;
/// status and readings arrive later from the device itself.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeviceDraft {
    #[validate(length(min = 3, max = 100, message = "name must be between 3 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "identifier must be between 1 and 50 characters"))]
    pub identifier: String,
    pub device_type: DeviceType,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 200, message = "location must be at most 200 characters"))]
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Full-replacement update payload. The hardware identifier is immutable
/// after registration and deliberately absent here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeviceUpdate {
    #[validate(length(min = 3, max = 100, message = "name must be between 3 and 100 characters"))]
    pub name: String,
    pub device_type: DeviceType,
    pub status: DeviceStatus,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 200, message = "location must be at most 200 characters"))]
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub last_reading: Option<String>,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn device_last_seen(last_communication: Option<Timestamp>) -> Device {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Device {
            id: 1,
            name: "Pump room sensor".to_string(),
            identifier: "AA:BB:CC:DD:EE:01".to_string(),
            device_type: DeviceType::TemperatureSensor,
            status: DeviceStatus::Active,
            description: None,
            location: None,
            latitude: None,
            longitude: None,
            last_reading: None,
            last_communication,
            is_active: true,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn never_communicated_is_offline_for_any_window() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let device = device_last_seen(None);
        assert!(!device.is_online(now));
        assert!(!device.online_since(now - Duration::days(365)));
    }

    #[test]
    fn online_window_boundary_is_strict() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();

        // Exactly on the cutoff: not online (strictly-after comparison).
        let on_boundary = device_last_seen(Some(now - Duration::minutes(ONLINE_WINDOW_MINUTES)));
        assert!(!on_boundary.is_online(now));

        let just_inside = device_last_seen(Some(
            now - Duration::minutes(ONLINE_WINDOW_MINUTES) + Duration::seconds(1),
        ));
        assert!(just_inside.is_online(now));
    }

    #[test]
    fn enums_serialize_to_screaming_snake_case() {
        let ty = serde_json::to_value(DeviceType::TemperatureSensor).unwrap();
        assert_eq!(ty, "TEMPERATURE_SENSOR");
        let status = serde_json::to_value(DeviceStatus::Configuring).unwrap();
        assert_eq!(status, "CONFIGURING");
    }

    #[test]
    fn as_str_matches_serde_names() {
        for ty in DeviceType::ALL {
            assert_eq!(serde_json::to_value(ty).unwrap(), ty.as_str());
        }
        for status in DeviceStatus::ALL {
            assert_eq!(serde_json::to_value(status).unwrap(), status.as_str());
        }
    }
}

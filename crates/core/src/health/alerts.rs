//! Per-device alert derivation.
//!
//! Each device is evaluated against an ordered chain of mutually exclusive
//! rules; the first match wins and a device emits at most one alert. The
//! result list is sorted critical-first.

use chrono::Duration;
use serde::Serialize;

use crate::device::{Device, DeviceStatus, DeviceType, ONLINE_WINDOW_MINUTES};
use crate::types::{DbId, Timestamp};

use super::IRREGULAR_WINDOW_MINUTES;

/// What kind of condition an alert reports.
///
/// `BatteryLow` and `ConfigurationIssue` are part of the closed alert
/// vocabulary but no rule emits them today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    DeviceOffline,
    CommunicationLost,
    DeviceError,
    MaintenanceRequired,
    BatteryLow,
    ConfigurationIssue,
}

/// Alert severity, declared low-to-high so the derived `Ord` ranks
/// `Critical` above `High` above `Medium` above `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// A single device needing attention.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceAlert {
    pub device_id: DbId,
    pub device_name: String,
    pub device_type: DeviceType,
    pub device_status: DeviceStatus,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub alert_message: String,
    pub location: Option<String>,
    pub last_communication: Option<Timestamp>,
    /// Whole elapsed minutes since the last communication; `None` when the
    /// device never communicated.
    pub minutes_since_last_communication: Option<i64>,
    /// Generation time; every alert in one batch shares the same value.
    pub alert_timestamp: Timestamp,
    pub is_critical: bool,
}

/// Outcome of a matched alert rule.
struct RuleOutcome {
    alert_type: AlertType,
    severity: AlertSeverity,
    message: &'static str,
    is_critical: bool,
}

/// Evaluate the ordered rule chain for one device.
///
/// First match wins: a device in error status is never additionally
/// flagged for stale communication even when both conditions hold.
fn classify(device: &Device, now: Timestamp) -> Option<RuleOutcome> {
    let comm_lost_cutoff = now - Duration::minutes(ONLINE_WINDOW_MINUTES * 6);
    let irregular_cutoff = now - Duration::minutes(IRREGULAR_WINDOW_MINUTES);

    // Both cutoffs above currently resolve to 30 minutes, which makes the
    // final MEDIUM rule unreachable. Kept verbatim from the documented rule
    // table; see DESIGN.md before changing either window.
    let rules = [
        (
            device.status == DeviceStatus::Error,
            RuleOutcome {
                alert_type: AlertType::DeviceError,
                severity: AlertSeverity::High,
                message: "Device is reporting an error status",
                is_critical: true,
            },
        ),
        (
            device.status == DeviceStatus::Maintenance,
            RuleOutcome {
                alert_type: AlertType::MaintenanceRequired,
                severity: AlertSeverity::Medium,
                message: "Device requires maintenance",
                is_critical: false,
            },
        ),
        (
            device.last_communication.is_none(),
            RuleOutcome {
                alert_type: AlertType::DeviceOffline,
                severity: AlertSeverity::Critical,
                message: "Device has never communicated",
                is_critical: true,
            },
        ),
        (
            device.last_communication.is_some_and(|at| at < comm_lost_cutoff),
            RuleOutcome {
                alert_type: AlertType::CommunicationLost,
                severity: AlertSeverity::High,
                message: "Device has not responded for over 30 minutes",
                is_critical: true,
            },
        ),
        (
            device.last_communication.is_some_and(|at| at < irregular_cutoff),
            RuleOutcome {
                alert_type: AlertType::CommunicationLost,
                severity: AlertSeverity::Medium,
                message: "Irregular communication detected",
                is_critical: false,
            },
        ),
    ];

    rules.into_iter().find_map(|(hit, outcome)| hit.then_some(outcome))
}

/// Derive the active alert list for a snapshot.
///
/// Sorted by descending severity; the sort is stable and all alerts in one
/// batch share `now` as their timestamp, so equal severities keep snapshot
/// iteration order and the output is deterministic.
pub fn active_alerts(devices: &[Device], now: Timestamp) -> Vec<DeviceAlert> {
    let mut alerts: Vec<DeviceAlert> = devices
        .iter()
        .filter_map(|device| classify(device, now).map(|outcome| build_alert(device, outcome, now)))
        .collect();

    alerts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.alert_timestamp.cmp(&a.alert_timestamp))
    });

    alerts
}

fn build_alert(device: &Device, outcome: RuleOutcome, now: Timestamp) -> DeviceAlert {
    let minutes_since_last_communication = device
        .last_communication
        .map(|at| (now - at).num_minutes());

    DeviceAlert {
        device_id: device.id,
        device_name: device.name.clone(),
        device_type: device.device_type,
        device_status: device.status,
        alert_type: outcome.alert_type,
        severity: outcome.severity,
        alert_message: outcome.message.to_string(),
        location: device.location.clone(),
        last_communication: device.last_communication,
        minutes_since_last_communication,
        alert_timestamp: now,
        is_critical: outcome.is_critical,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

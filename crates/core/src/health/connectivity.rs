//! Connectivity metrics over multiple time windows.

use chrono::{Duration, NaiveTime};
use serde::Serialize;

use crate::device::{Device, DeviceStatus, ONLINE_WINDOW_MINUTES};
use crate::types::Timestamp;

use super::{count_online_since, percentage, IRREGULAR_WINDOW_MINUTES};

/// Communication health across the whole fleet.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectivityStats {
    pub devices_online_last_5_min: i64,
    pub devices_online_last_hour: i64,
    /// Devices that communicated since the start of the current UTC day.
    pub devices_online_today: i64,
    pub devices_never_communicated: i64,
    /// Mean whole minutes since last communication over devices that have
    /// communicated at least once; `0.0` when none have.
    pub average_time_since_last_communication: f64,
    /// Share of devices in `Active` status.
    pub overall_uptime_percentage: f64,
    /// Alias of the 5-minute online percentage.
    pub connectivity_rate: f64,
    /// `Active` devices that have communicated, but not for over 30 minutes.
    pub devices_with_irregular_communication: i64,
    pub last_check_time: Timestamp,
}

/// Compute [`ConnectivityStats`] for a device snapshot.
pub fn connectivity_stats(devices: &[Device], now: Timestamp) -> ConnectivityStats {
    if devices.is_empty() {
        return empty_connectivity(now);
    }

    let start_of_today = now.date_naive().and_time(NaiveTime::MIN).and_utc();

    let online_last_5_min =
        count_online_since(devices, now - Duration::minutes(ONLINE_WINDOW_MINUTES));
    let online_last_hour = count_online_since(devices, now - Duration::hours(1));
    let online_today = count_online_since(devices, start_of_today);

    let never_communicated = devices
        .iter()
        .filter(|d| d.last_communication.is_none())
        .count();

    let active = devices
        .iter()
        .filter(|d| d.status == DeviceStatus::Active)
        .count();

    let irregular_cutoff = now - Duration::minutes(IRREGULAR_WINDOW_MINUTES);
    let irregular = devices
        .iter()
        .filter(|d| d.status == DeviceStatus::Active)
        .filter(|d| d.last_communication.is_some_and(|at| at < irregular_cutoff))
        .count();

    ConnectivityStats {
        devices_online_last_5_min: online_last_5_min as i64,
        devices_online_last_hour: online_last_hour as i64,
        devices_online_today: online_today as i64,
        devices_never_communicated: never_communicated as i64,
        average_time_since_last_communication: average_minutes_since_communication(devices, now),
        overall_uptime_percentage: percentage(active, devices.len()),
        connectivity_rate: percentage(online_last_5_min, devices.len()),
        devices_with_irregular_communication: irregular as i64,
        last_check_time: now,
    }
}

/// Arithmetic mean of whole minutes since last communication, over devices
/// that have communicated.
fn average_minutes_since_communication(devices: &[Device], now: Timestamp) -> f64 {
    let minutes: Vec<i64> = devices
        .iter()
        .filter_map(|d| d.last_communication)
        .map(|at| (now - at).num_minutes())
        .collect();

    if minutes.is_empty() {
        return 0.0;
    }

    minutes.iter().sum::<i64>() as f64 / minutes.len() as f64
}

fn empty_connectivity(now: Timestamp) -> ConnectivityStats {
    ConnectivityStats {
        devices_online_last_5_min: 0,
        devices_online_last_hour: 0,
        devices_online_today: 0,
        devices_never_communicated: 0,
        average_time_since_last_communication: 0.0,
        overall_uptime_percentage: 0.0,
        connectivity_rate: 0.0,
        devices_with_irregular_communication: 0,
        last_check_time: now,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::super::testutil::{device, fixed_now};
    use super::*;

    #[test]
    fn empty_snapshot_yields_all_zero() {
        let now = fixed_now();
        let stats = connectivity_stats(&[], now);

        assert_eq!(stats.devices_online_last_5_min, 0);
        assert_eq!(stats.devices_online_last_hour, 0);
        assert_eq!(stats.devices_online_today, 0);
        assert_eq!(stats.devices_never_communicated, 0);
        assert_eq!(stats.average_time_since_last_communication, 0.0);
        assert_eq!(stats.overall_uptime_percentage, 0.0);
        assert_eq!(stats.connectivity_rate, 0.0);
        assert_eq!(stats.devices_with_irregular_communication, 0);
    }

    #[test]
    fn windows_are_nested_for_monotonic_timestamps() {
        // fixed_now is 12:00 UTC, so "today" spans strictly more than an hour.
        let now = fixed_now();
        let devices = vec![
            device(1, DeviceStatus::Active, Some(now - Duration::minutes(2))), // all three
            device(2, DeviceStatus::Active, Some(now - Duration::minutes(30))), // hour + today
            device(3, DeviceStatus::Active, Some(now - Duration::hours(3))),   // today only
            device(4, DeviceStatus::Active, Some(now - Duration::days(2))),    // none
            device(5, DeviceStatus::Active, None),                             // never
        ];

        let stats = connectivity_stats(&devices, now);
        assert_eq!(stats.devices_online_last_5_min, 1);
        assert_eq!(stats.devices_online_last_hour, 2);
        assert_eq!(stats.devices_online_today, 3);
        assert!(stats.devices_online_last_5_min <= stats.devices_online_last_hour);
        assert!(stats.devices_online_last_hour <= stats.devices_online_today);
        assert_eq!(stats.devices_never_communicated, 1);
    }

    #[test]
    fn average_ignores_devices_that_never_communicated() {
        let now = fixed_now();
        let devices = vec![
            device(1, DeviceStatus::Active, Some(now - Duration::minutes(10))),
            device(2, DeviceStatus::Active, Some(now - Duration::minutes(20))),
            device(3, DeviceStatus::Active, None),
        ];

        let stats = connectivity_stats(&devices, now);
        assert_eq!(stats.average_time_since_last_communication, 15.0);
    }

    #[test]
    fn average_is_zero_when_nothing_ever_communicated() {
        let now = fixed_now();
        let devices = vec![
            device(1, DeviceStatus::Active, None),
            device(2, DeviceStatus::Inactive, None),
        ];

        let stats = connectivity_stats(&devices, now);
        assert_eq!(stats.average_time_since_last_communication, 0.0);
        assert_eq!(stats.devices_never_communicated, 2);
    }

    #[test]
    fn irregular_counts_only_silent_active_devices() {
        let now = fixed_now();
        let devices = vec![
            // Active and silent for 45 minutes: irregular.
            device(1, DeviceStatus::Active, Some(now - Duration::minutes(45))),
            // Active and recent: fine.
            device(2, DeviceStatus::Active, Some(now - Duration::minutes(5))),
            // Silent but already flagged Offline: excluded by construction.
            device(3, DeviceStatus::Offline, Some(now - Duration::hours(2))),
            // Active but never communicated: not irregular, never-communicated.
            device(4, DeviceStatus::Active, None),
        ];

        let stats = connectivity_stats(&devices, now);
        assert_eq!(stats.devices_with_irregular_communication, 1);
    }

    #[test]
    fn uptime_is_active_share_and_rate_is_online_share() {
        let now = fixed_now();
        let devices = vec![
            device(1, DeviceStatus::Active, Some(now - Duration::minutes(1))),
            device(2, DeviceStatus::Active, Some(now - Duration::hours(2))),
            device(3, DeviceStatus::Inactive, None),
            device(4, DeviceStatus::Error, None),
        ];

        let stats = connectivity_stats(&devices, now);
        // 2 of 4 active.
        assert_eq!(stats.overall_uptime_percentage, 50.0);
        // 1 of 4 online in the last 5 minutes.
        assert_eq!(stats.connectivity_rate, 25.0);
    }
}

//! The device health engine: dashboard aggregation, connectivity analysis
//! and alert derivation.
//!
//! Pure logic — no registry access. The caller is responsible for fetching
//! a stable device snapshot and passing it in together with `now`.

mod alerts;
mod connectivity;
mod distribution;
mod stats;

pub use alerts::{active_alerts, AlertSeverity, AlertType, DeviceAlert};
pub use connectivity::{connectivity_stats, ConnectivityStats};
pub use distribution::{
    status_distribution, type_distribution, StatusDistribution, TypeDistribution,
};
pub use stats::{dashboard_stats, DashboardStats, SystemStatus};

use crate::device::Device;
use crate::types::Timestamp;

/// An `Active` device that has not communicated for this long is treated
/// as communicating irregularly.
pub const IRREGULAR_WINDOW_MINUTES: i64 = 30;

/// Count devices whose last communication is strictly after `cutoff`.
pub(crate) fn count_online_since(devices: &[Device], cutoff: Timestamp) -> usize {
    devices.iter().filter(|d| d.online_since(cutoff)).count()
}

/// Percentage rounded to one decimal place. Zero denominator yields `0.0`.
pub(crate) fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    (numerator as f64 * 100.0 / denominator as f64 * 10.0).round() / 10.0
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{TimeZone, Utc};

    use crate::device::{Device, DeviceStatus, DeviceType};
    use crate::types::{DbId, Timestamp};

    /// A fixed, arbitrary "now" so tests never depend on the wall clock.
    pub fn fixed_now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    /// Minimal device with the fields the engine cares about.
    pub fn device(
        id: DbId,
        status: DeviceStatus,
        last_communication: Option<Timestamp>,
    ) -> Device {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Device {
            id,
            name: format!("device-{id}"),
            identifier: format!("id-{id}"),
            device_type: DeviceType::Generic,
            status,
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

    pub fn typed(mut d: Device, device_type: DeviceType) -> Device {
        d.device_type = device_type;
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_guards_zero_denominator() {
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        // 1/3 -> 33.333...% -> 33.3
        assert_eq!(percentage(1, 3), 33.3);
        // 2/3 -> 66.666...% -> 66.7
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(3, 3), 100.0);
        assert_eq!(percentage(0, 7), 0.0);
    }
}

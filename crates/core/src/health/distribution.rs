//! Status and type distribution summaries for the dashboard breakdowns.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::device::{Device, DeviceStatus, DeviceType};

/// Per-status device counts plus the dominant status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusDistribution {
    /// Counts for statuses present in the snapshot.
    pub status_counts: BTreeMap<DeviceStatus, i64>,
    pub total_devices: i64,
    /// `"N/A"` when the snapshot is empty.
    pub most_common_status: String,
    pub most_common_count: i64,
}

/// Per-type device counts plus the dominant type.
#[derive(Debug, Clone, Serialize)]
pub struct TypeDistribution {
    /// Counts for device types present in the snapshot.
    pub type_counts: BTreeMap<DeviceType, i64>,
    pub total_devices: i64,
    /// `"N/A"` when the snapshot is empty.
    pub most_common_type: String,
    pub most_common_count: i64,
    pub total_types: i64,
}

/// Group the snapshot by device status.
pub fn status_distribution(devices: &[Device]) -> StatusDistribution {
    let mut status_counts: BTreeMap<DeviceStatus, i64> = BTreeMap::new();
    for device in devices {
        *status_counts.entry(device.status).or_default() += 1;
    }

    let (most_common_status, most_common_count) =
        most_common(&status_counts, DeviceStatus::as_str);

    StatusDistribution {
        status_counts,
        total_devices: devices.len() as i64,
        most_common_status,
        most_common_count,
    }
}

/// Group the snapshot by device type.
pub fn type_distribution(devices: &[Device]) -> TypeDistribution {
    let mut type_counts: BTreeMap<DeviceType, i64> = BTreeMap::new();
    for device in devices {
        *type_counts.entry(device.device_type).or_default() += 1;
    }

    let (most_common_type, most_common_count) = most_common(&type_counts, DeviceType::as_str);
    let total_types = type_counts.len() as i64;

    TypeDistribution {
        type_counts,
        total_devices: devices.len() as i64,
        most_common_type,
        most_common_count,
        total_types,
    }
}

/// Largest bucket in a count map. Ties resolve to the first key in map
/// order, which keeps the output deterministic.
fn most_common<K: Copy>(counts: &BTreeMap<K, i64>, name: impl Fn(&K) -> &'static str) -> (String, i64) {
    let mut best: Option<(&K, i64)> = None;
    for (key, count) in counts {
        if best.map_or(true, |(_, c)| *count > c) {
            best = Some((key, *count));
        }
    }
    best.map(|(key, count)| (name(key).to_string(), count))
        .unwrap_or_else(|| ("N/A".to_string(), 0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::super::testutil::{device, fixed_now, typed};
    use super::*;

    #[test]
    fn empty_snapshot_reports_not_available() {
        let status = status_distribution(&[]);
        assert_eq!(status.total_devices, 0);
        assert!(status.status_counts.is_empty());
        assert_eq!(status.most_common_status, "N/A");
        assert_eq!(status.most_common_count, 0);

        let types = type_distribution(&[]);
        assert_eq!(types.most_common_type, "N/A");
        assert_eq!(types.total_types, 0);
    }

    #[test]
    fn counts_and_most_common_status() {
        let now = fixed_now();
        let devices = vec![
            device(1, DeviceStatus::Active, Some(now)),
            device(2, DeviceStatus::Active, Some(now)),
            device(3, DeviceStatus::Error, None),
        ];

        let dist = status_distribution(&devices);
        assert_eq!(dist.total_devices, 3);
        assert_eq!(dist.status_counts[&DeviceStatus::Active], 2);
        assert_eq!(dist.status_counts[&DeviceStatus::Error], 1);
        assert_eq!(dist.most_common_status, "ACTIVE");
        assert_eq!(dist.most_common_count, 2);
    }

    #[test]
    fn counts_types_and_distinct_total() {
        let now = fixed_now();
        let devices = vec![
            typed(device(1, DeviceStatus::Active, Some(now)), DeviceType::Tracker),
            typed(device(2, DeviceStatus::Active, Some(now)), DeviceType::Tracker),
            typed(
                device(3, DeviceStatus::Active, Some(now)),
                DeviceType::HumiditySensor,
            ),
        ];

        let dist = type_distribution(&devices);
        assert_eq!(dist.total_devices, 3);
        assert_eq!(dist.total_types, 2);
        assert_eq!(dist.most_common_type, "TRACKER");
        assert_eq!(dist.most_common_count, 2);
    }
}

use fixtures::model::{Device, DeviceStatus};
use serde::Serialize;

const LOW_BATTERY_BELOW: u8 = 20;
/// Share of the fleet reported as "alerts in the last 24h". There is no alert
/// pipeline behind this figure; it is an estimate kept for the dashboard card.
const ALERT_RATIO: f64 = 0.2;

/// Aggregate figures for the overview cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub maintenance: usize,
    pub avg_signal: f64,
    pub battery_low: usize,
    pub alerts_24h: usize,
    // Aliases kept for older dashboard widgets
    pub total_devices: usize,
    pub active_devices: usize,
}

pub fn compute_stats(devices: &[Device]) -> FleetStats {
    let count = |status: DeviceStatus| devices.iter().filter(|d| d.status == status).count();
    let total = devices.len();
    let active = count(DeviceStatus::Active);
    let signal_sum: u64 = devices.iter().map(|d| u64::from(d.signal_strength)).sum();

    FleetStats {
        total,
        active,
        inactive: count(DeviceStatus::Inactive),
        maintenance: count(DeviceStatus::Maintenance),
        avg_signal: signal_sum as f64 / total.max(1) as f64,
        battery_low: devices
            .iter()
            .filter(|d| d.battery_level < LOW_BATTERY_BELOW)
            .count(),
        alerts_24h: (total as f64 * ALERT_RATIO).floor() as usize,
        total_devices: total,
        active_devices: active,
    }
}

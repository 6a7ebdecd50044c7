use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use fixtures::model::{Device, DeviceStatus};

const BATTERY_MAX: u8 = 100;
const SIGNAL_MAX: u8 = 4;
const TEMP_MIN: f64 = -50.0;
const TEMP_MAX: f64 = 100.0;
const HUMIDITY_MIN: f64 = 0.0;
const HUMIDITY_MAX: f64 = 100.0;
const PRESSURE_MIN: f64 = 800.0;
const PRESSURE_MAX: f64 = 1200.0;
const ACTIVE_WINDOW_MINUTES: i64 = 10;
const OFFLINE_AFTER_MINUTES: i64 = 60;
const CLOCK_SKEW_SECS: i64 = 5;

/// Validates a device delivered by a fleet source for `org_id`.
pub fn validate(device: &Device, org_id: &str, now: DateTime<Utc>) -> Result<()> {
    if device.id.is_empty() {
        return Err(Error::Validation("Device ID cannot be empty".to_string()));
    }

    if device.org_id != org_id {
        return Err(Error::Validation(format!(
            "Device {} belongs to {}, expected {}",
            device.id, device.org_id, org_id
        )));
    }

    if device.battery_level > BATTERY_MAX {
        return Err(Error::Validation(format!(
            "Battery {} out of range [0, {}]",
            device.battery_level, BATTERY_MAX
        )));
    }

    if device.signal_strength > SIGNAL_MAX {
        return Err(Error::Validation(format!(
            "Signal strength {} out of range [0, {}]",
            device.signal_strength, SIGNAL_MAX
        )));
    }

    let metrics = &device.metrics;
    if !(TEMP_MIN..=TEMP_MAX).contains(&metrics.temperature) {
        return Err(Error::Validation(format!(
            "Temperature {} out of range [{}, {}]",
            metrics.temperature, TEMP_MIN, TEMP_MAX
        )));
    }
    if !(HUMIDITY_MIN..=HUMIDITY_MAX).contains(&metrics.humidity) {
        return Err(Error::Validation(format!(
            "Humidity {} out of range [{}, {}]",
            metrics.humidity, HUMIDITY_MIN, HUMIDITY_MAX
        )));
    }
    if !(PRESSURE_MIN..=PRESSURE_MAX).contains(&metrics.pressure) {
        return Err(Error::Validation(format!(
            "Pressure {} out of range [{}, {}]",
            metrics.pressure, PRESSURE_MIN, PRESSURE_MAX
        )));
    }

    // Sources stamp last_seen against their own clock reading
    let age = now - device.last_seen;
    let skew = Duration::seconds(CLOCK_SKEW_SECS);
    match device.status {
        DeviceStatus::Active if age > Duration::minutes(ACTIVE_WINDOW_MINUTES) + skew => {
            Err(Error::Validation(format!(
                "Active device {} last seen {} minutes ago",
                device.id,
                age.num_minutes()
            )))
        }
        DeviceStatus::Inactive | DeviceStatus::Maintenance
            if age < Duration::minutes(OFFLINE_AFTER_MINUTES) - skew =>
        {
            Err(Error::Validation(format!(
                "Device {} is {} but was seen {} minutes ago",
                device.id,
                device.status,
                age.num_minutes()
            )))
        }
        _ => Ok(()),
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tenant owning a slice of the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Active,
    Inactive,
    Maintenance,
}

impl DeviceStatus {
    pub const ALL: [DeviceStatus; 3] = [
        DeviceStatus::Active,
        DeviceStatus::Inactive,
        DeviceStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "active",
            DeviceStatus::Inactive => "inactive",
            DeviceStatus::Maintenance => "maintenance",
        }
    }
}

impl FromStr for DeviceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(DeviceStatus::Active),
            "inactive" => Ok(DeviceStatus::Inactive),
            "maintenance" => Ok(DeviceStatus::Maintenance),
            _ => Err(format!("Unknown device status: {}", s)),
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Sensor,
    Gateway,
    Actuator,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 3] = [DeviceKind::Sensor, DeviceKind::Gateway, DeviceKind::Actuator];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Latest environmental readings reported by a device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceMetrics {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

/// One member of an organization's fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub org_id: String,
    pub name: String,
    pub serial_number: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub status: DeviceStatus,
    pub last_seen: DateTime<Utc>,
    pub firmware_version: String,
    pub battery_level: u8,
    pub signal_strength: u8,
    pub location: GeoLocation,
    pub metrics: DeviceMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Info,
    Warning,
    Error,
    Success,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 4] = [
        ActivityKind::Info,
        ActivityKind::Warning,
        ActivityKind::Error,
        ActivityKind::Success,
    ];

    /// Fixed message catalog for this kind of log entry.
    pub fn messages(&self) -> &'static [&'static str] {
        match self {
            ActivityKind::Info => &[
                "Firmware updated",
                "Configuration changed",
                "Maintenance scheduled",
            ],
            ActivityKind::Warning => &["High temperature detected", "Weak signal", "High latency"],
            ActivityKind::Error => &["Device offline", "Sensor failure", "Connection lost"],
            ActivityKind::Success => &[
                "Device connected",
                "Calibration complete",
                "Self-test passed",
            ],
        }
    }
}

/// Activity feed entry. Device id and name are a snapshot taken at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    pub device_id: String,
    pub device_name: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Hourly row of the org-wide telemetry chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPoint {
    pub time: String,
    pub temp: f64,
    pub humidity: f64,
    pub power: f64,
}

use fixtures::model::{Device, DeviceStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status predicate for the device list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(DeviceStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: DeviceStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Parsing never fails: anything that is not a known status means "all".
impl FromStr for StatusFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<DeviceStatus>()
            .map(StatusFilter::Only)
            .unwrap_or(StatusFilter::All))
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// Current device-list predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceQuery {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub search: String,
}

impl DeviceQuery {
    pub fn matches(&self, device: &Device) -> bool {
        if !self.status.matches(device.status) {
            return false;
        }
        let needle = self.search.to_lowercase();
        device.name.to_lowercase().contains(&needle)
            || device.serial_number.to_lowercase().contains(&needle)
    }
}

/// Devices satisfying `query`, in their original order.
pub fn filter_devices(devices: &[Device], query: &DeviceQuery) -> Vec<Device> {
    devices
        .iter()
        .filter(|device| query.matches(device))
        .cloned()
        .collect()
}

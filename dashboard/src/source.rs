//! Where fleet data comes from.
//!
//! The dashboard only talks to [`FleetSource`]; [`MockFleetSource`] backs it
//! with the fixture generators. A networked backend would implement the same
//! trait.

use fixtures::model::{ActivityLog, Device, Organization, TelemetryPoint};
use fixtures::{catalog, generate_devices, generate_recent_activity, generate_telemetry};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Mutex;

pub trait FleetSource: Send + Sync {
    fn organizations(&self) -> Vec<Organization>;

    fn fetch_devices(&self, org_id: &str) -> Vec<Device>;

    fn fetch_recent_activity(&self, devices: &[Device]) -> Vec<ActivityLog>;

    fn fetch_telemetry_history(&self) -> Vec<TelemetryPoint>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureCounts {
    pub devices_per_org: usize,
    pub activity: usize,
    pub telemetry_points: usize,
}

impl Default for FixtureCounts {
    fn default() -> Self {
        Self {
            devices_per_org: 50,
            activity: 10,
            telemetry_points: 24,
        }
    }
}

pub struct MockFleetSource {
    counts: FixtureCounts,
    // Serial numbers, activity and telemetry; devices are seeded per org
    noise: Mutex<Box<dyn RngCore + Send>>,
}

impl MockFleetSource {
    pub fn new(counts: FixtureCounts) -> Self {
        Self::with_noise(counts, StdRng::from_entropy())
    }

    /// Fully reproducible fixtures, for tests and demos.
    pub fn seeded(counts: FixtureCounts, seed: u64) -> Self {
        Self::with_noise(counts, StdRng::seed_from_u64(seed))
    }

    fn with_noise(counts: FixtureCounts, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            counts,
            noise: Mutex::new(Box::new(rng)),
        }
    }

    pub fn counts(&self) -> FixtureCounts {
        self.counts
    }

    fn noise(&self) -> std::sync::MutexGuard<'_, Box<dyn RngCore + Send>> {
        self.noise.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockFleetSource {
    fn default() -> Self {
        Self::new(FixtureCounts::default())
    }
}

impl FleetSource for MockFleetSource {
    fn organizations(&self) -> Vec<Organization> {
        catalog::organizations()
    }

    fn fetch_devices(&self, org_id: &str) -> Vec<Device> {
        generate_devices(self.counts.devices_per_org, org_id, &mut *self.noise())
    }

    fn fetch_recent_activity(&self, devices: &[Device]) -> Vec<ActivityLog> {
        generate_recent_activity(self.counts.activity, devices, &mut *self.noise())
    }

    fn fetch_telemetry_history(&self) -> Vec<TelemetryPoint> {
        generate_telemetry(self.counts.telemetry_points, &mut *self.noise())
    }
}

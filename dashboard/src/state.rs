use crate::filter::{filter_devices, DeviceQuery, StatusFilter};
use crate::metrics::{DEVICES_LOADED, INVALID_DEVICES_TOTAL, REGENERATIONS_TOTAL, REGENERATION_LATENCY_SECONDS};
use crate::session::OrgSession;
use crate::source::FleetSource;
use crate::stats::{compute_stats, FleetStats};
use crate::validate::validate;
use chrono::Utc;
use fixtures::model::{ActivityLog, Device, Organization, TelemetryPoint};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Everything the dashboard shows for one organization.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    /// Organization the collections were generated for.
    pub organization: Option<Organization>,
    pub devices: Vec<Device>,
    pub recent_activity: Vec<ActivityLog>,
    pub telemetry_history: Vec<TelemetryPoint>,
    pub query: DeviceQuery,
}

impl DashboardData {
    pub fn filtered_devices(&self) -> Vec<Device> {
        filter_devices(&self.devices, &self.query)
    }

    pub fn stats(&self) -> FleetStats {
        compute_stats(&self.devices)
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|device| device.id == id)
    }
}

/// Couples the organization session with the data derived from it.
///
/// Collections are replaced wholesale, together with the organization they
/// belong to, so readers never see one org's devices under another's name.
#[derive(Clone)]
pub struct Dashboard {
    session: OrgSession,
    source: Arc<dyn FleetSource>,
    data: Arc<RwLock<DashboardData>>,
}

impl Dashboard {
    /// Loads data for the session's current organization right away unless a
    /// switch is already pending.
    pub fn new(session: OrgSession, source: Arc<dyn FleetSource>) -> Self {
        let dashboard = Self {
            session,
            source,
            data: Arc::new(RwLock::new(DashboardData::default())),
        };

        let state = dashboard.session.state();
        if !state.loading {
            dashboard.regenerate(&state.current);
        }
        dashboard
    }

    pub fn session(&self) -> &OrgSession {
        &self.session
    }

    pub fn snapshot(&self) -> DashboardData {
        self.read().clone()
    }

    pub fn organization(&self) -> Option<Organization> {
        self.read().organization.clone()
    }

    pub fn devices(&self) -> Vec<Device> {
        self.read().devices.clone()
    }

    pub fn filtered_devices(&self) -> Vec<Device> {
        self.read().filtered_devices()
    }

    /// Devices matching an ad-hoc query, leaving the stored one alone.
    pub fn query_devices(&self, query: &DeviceQuery) -> Vec<Device> {
        filter_devices(&self.read().devices, query)
    }

    pub fn device(&self, id: &str) -> Option<Device> {
        self.read().device(id).cloned()
    }

    pub fn stats(&self) -> FleetStats {
        self.read().stats()
    }

    pub fn recent_activity(&self) -> Vec<ActivityLog> {
        self.read().recent_activity.clone()
    }

    pub fn telemetry_history(&self) -> Vec<TelemetryPoint> {
        self.read().telemetry_history.clone()
    }

    pub fn query(&self) -> DeviceQuery {
        self.read().query.clone()
    }

    pub fn set_query(&self, query: DeviceQuery) {
        debug!("Device query set to status={}, search={:?}", query.status, query.search);
        self.write().query = query;
    }

    pub fn set_status_filter(&self, status: StatusFilter) {
        self.write().query.status = status;
    }

    pub fn set_search(&self, search: impl Into<String>) {
        self.write().query.search = search.into();
    }

    pub fn switch_organization(&self, org_id: &str) -> bool {
        self.session.switch_organization(org_id)
    }

    /// Regenerates everything for the current organization.
    ///
    /// Skipped while an organization switch is pending; the switch itself
    /// triggers a regeneration once it lands. Returns whether data was
    /// regenerated.
    pub fn refresh(&self) -> bool {
        let state = self.session.state();
        if state.loading {
            debug!("Refresh skipped, organization switch in progress");
            return false;
        }
        self.regenerate(&state.current)
    }

    /// Follows the session and regenerates whenever a switch completes.
    pub fn spawn_sync(&self) -> JoinHandle<()> {
        let dashboard = self.clone();
        tokio::spawn(async move { dashboard.run_sync().await })
    }

    pub async fn run_sync(self) {
        let mut rx = self.session.subscribe();
        info!("Dashboard sync started");

        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            if state.loading {
                debug!("Organization switch pending, regeneration suspended");
                continue;
            }
            self.regenerate(&state.current);
        }

        info!("Dashboard sync stopped");
    }

    /// Returns false when the session moved on while fetching; the result is
    /// then discarded.
    fn regenerate(&self, org: &Organization) -> bool {
        let start = Instant::now();
        let now = Utc::now();

        let fetched = self.source.fetch_devices(&org.id);
        let fetched_len = fetched.len();
        let devices: Vec<Device> = fetched
            .into_iter()
            .filter(|device| match validate(device, &org.id, now) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Dropping device {}: {}", device.id, e);
                    INVALID_DEVICES_TOTAL.inc();
                    false
                }
            })
            .collect();
        let recent_activity = self.source.fetch_recent_activity(&devices);
        let telemetry_history = self.source.fetch_telemetry_history();
        let device_count = devices.len();

        {
            let mut data = self.write();
            // Checked under the data lock so a stale fetch cannot overwrite newer data
            let state = self.session.state();
            if state.loading || state.current.id != org.id {
                debug!(
                    "Discarding data fetched for {}, session is on {} (loading={})",
                    org.id, state.current.id, state.loading
                );
                return false;
            }
            data.organization = Some(org.clone());
            data.devices = devices;
            data.recent_activity = recent_activity;
            data.telemetry_history = telemetry_history;
        }

        let elapsed = start.elapsed().as_secs_f64();
        REGENERATIONS_TOTAL.inc();
        REGENERATION_LATENCY_SECONDS.observe(elapsed);
        DEVICES_LOADED.set(device_count as f64);
        info!(
            "Regenerated data for {}: {} devices ({} fetched) in {:.3}ms",
            org.id,
            device_count,
            fetched_len,
            elapsed * 1000.0
        );
        true
    }

    fn read(&self) -> RwLockReadGuard<'_, DashboardData> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, DashboardData> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

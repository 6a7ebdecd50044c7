use crate::metrics::{ORG_SWITCHES_IGNORED_TOTAL, ORG_SWITCHES_SUPERSEDED_TOTAL, ORG_SWITCHES_TOTAL};
use fixtures::catalog;
use fixtures::model::Organization;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub const DEFAULT_SWITCH_LATENCY: Duration = Duration::from_millis(500);

/// Snapshot published to session readers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub current: Organization,
    pub loading: bool,
}

/// Current organization and loading flag for one running dashboard.
///
/// Cheap to clone; clones share the same state. `switch_organization` is the
/// only writer. Readers either poll [`OrgSession::state`] or follow changes
/// through [`OrgSession::subscribe`].
#[derive(Clone)]
pub struct OrgSession {
    inner: Arc<Inner>,
}

struct Inner {
    catalog: Vec<Organization>,
    latency: Duration,
    state_tx: watch::Sender<SessionState>,
    pending: Mutex<Option<CancellationToken>>,
}

impl OrgSession {
    /// Starts on the first catalog entry.
    pub fn new(catalog: Vec<Organization>, latency: Duration) -> Self {
        let current = catalog
            .first()
            .cloned()
            .unwrap_or_else(catalog::default_organization);
        let (state_tx, _) = watch::channel(SessionState {
            current,
            loading: false,
        });

        Self {
            inner: Arc::new(Inner {
                catalog,
                latency,
                state_tx,
                pending: Mutex::new(None),
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.state_tx.borrow().clone()
    }

    pub fn current_organization(&self) -> Organization {
        self.inner.state_tx.borrow().current.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state_tx.borrow().loading
    }

    pub fn organizations(&self) -> &[Organization] {
        &self.inner.catalog
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state_tx.subscribe()
    }

    /// Resolves once no switch is pending.
    pub async fn settled(&self) -> SessionState {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait
        let state = match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        state
    }

    /// Schedules a switch to `org_id` after the configured latency.
    ///
    /// Unknown ids are ignored and leave the state untouched. A newer request
    /// cancels one that is still pending. Must be called from within a tokio
    /// runtime. Returns whether a switch was scheduled.
    pub fn switch_organization(&self, org_id: &str) -> bool {
        let Some(org) = self.inner.catalog.iter().find(|o| o.id == org_id).cloned() else {
            debug!("Ignoring switch to unknown organization {}", org_id);
            ORG_SWITCHES_IGNORED_TOTAL.inc();
            return false;
        };

        let token = CancellationToken::new();
        {
            let mut pending = self.inner.lock_pending();
            if let Some(previous) = pending.replace(token.clone()) {
                if !previous.is_cancelled() {
                    previous.cancel();
                    ORG_SWITCHES_SUPERSEDED_TOTAL.inc();
                    info!("Pending organization switch superseded by {}", org.id);
                }
            }
            self.inner.state_tx.send_modify(|state| state.loading = true);
        }

        ORG_SWITCHES_TOTAL.inc();
        info!("Switching organization to {} ({})", org.id, org.name);

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Switch to {} cancelled", org.id);
                }
                _ = tokio::time::sleep(inner.latency) => {
                    inner.apply(org, &token);
                }
            }
        });

        true
    }
}

impl Inner {
    fn lock_pending(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn apply(&self, org: Organization, token: &CancellationToken) {
        let mut pending = self.lock_pending();
        // Cancellation and apply both happen under the lock
        if token.is_cancelled() {
            return;
        }
        *pending = None;
        info!("Organization switched to {}", org.id);
        self.state_tx.send_modify(|state| {
            state.current = org;
            state.loading = false;
        });
    }
}

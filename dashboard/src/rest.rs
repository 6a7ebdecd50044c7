use crate::filter::DeviceQuery;
use crate::metrics;
use crate::model::{DeviceListParams, ListResponse, RefreshResponse, SwitchResponse};
use crate::session::SessionState;
use crate::state::Dashboard;
use crate::stats::FleetStats;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use fixtures::model::{ActivityLog, Device, Organization, TelemetryPoint};
use tracing::{debug, error};

pub fn create_router(dashboard: Dashboard) -> Router {
    Router::new()
        .route("/api/v1/organizations", get(list_organizations))
        .route("/api/v1/session", get(get_session))
        .route("/api/v1/session/organization/:org_id", post(switch_organization))
        .route("/api/v1/devices", get(list_devices))
        .route("/api/v1/devices/:id", get(get_device))
        .route("/api/v1/filter", get(get_filter).put(put_filter))
        .route("/api/v1/stats", get(get_stats))
        .route("/api/v1/activity", get(get_activity))
        .route("/api/v1/telemetry", get(get_telemetry))
        .route("/api/v1/refresh", post(refresh))
        .route("/metrics", get(metrics_handler))
        .with_state(dashboard)
}

async fn list_organizations(State(dashboard): State<Dashboard>) -> Json<ListResponse<Organization>> {
    Json(dashboard.session().organizations().to_vec().into())
}

async fn get_session(State(dashboard): State<Dashboard>) -> Json<SessionState> {
    Json(dashboard.session().state())
}

async fn switch_organization(
    State(dashboard): State<Dashboard>,
    Path(org_id): Path<String>,
) -> (StatusCode, Json<SwitchResponse>) {
    let scheduled = dashboard.switch_organization(&org_id);
    let status = if scheduled {
        StatusCode::ACCEPTED
    } else {
        StatusCode::OK
    };
    (status, Json(SwitchResponse { scheduled }))
}

async fn list_devices(
    State(dashboard): State<Dashboard>,
    Query(params): Query<DeviceListParams>,
) -> Json<ListResponse<Device>> {
    let devices = if params.status.is_none() && params.search.is_none() {
        dashboard.filtered_devices()
    } else {
        let current = dashboard.query();
        let query = DeviceQuery {
            status: params.status.unwrap_or(current.status),
            search: params.search.unwrap_or(current.search),
        };
        dashboard.query_devices(&query)
    };
    Json(devices.into())
}

async fn get_device(
    State(dashboard): State<Dashboard>,
    Path(id): Path<String>,
) -> Result<Json<Device>, StatusCode> {
    dashboard.device(&id).map(Json).ok_or_else(|| {
        debug!("Device {} not found", id);
        StatusCode::NOT_FOUND
    })
}

async fn get_filter(State(dashboard): State<Dashboard>) -> Json<DeviceQuery> {
    Json(dashboard.query())
}

async fn put_filter(
    State(dashboard): State<Dashboard>,
    Json(query): Json<DeviceQuery>,
) -> Json<DeviceQuery> {
    dashboard.set_query(query);
    Json(dashboard.query())
}

async fn get_stats(State(dashboard): State<Dashboard>) -> Json<FleetStats> {
    Json(dashboard.stats())
}

async fn get_activity(State(dashboard): State<Dashboard>) -> Json<ListResponse<ActivityLog>> {
    Json(dashboard.recent_activity().into())
}

async fn get_telemetry(State(dashboard): State<Dashboard>) -> Json<ListResponse<TelemetryPoint>> {
    Json(dashboard.telemetry_history().into())
}

async fn refresh(State(dashboard): State<Dashboard>) -> Json<RefreshResponse> {
    Json(RefreshResponse {
        refreshed: dashboard.refresh(),
    })
}

async fn metrics_handler() -> Result<String, AppError> {
    metrics::gather_metrics().map_err(|e| AppError(anyhow::anyhow!("Failed to gather metrics: {}", e)))
}

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("API error: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal server error: {}", self.0),
        )
            .into_response()
    }
}

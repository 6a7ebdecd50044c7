use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use dashboard::rest::create_router;
use dashboard::session::{OrgSession, DEFAULT_SWITCH_LATENCY};
use dashboard::source::{FixtureCounts, MockFleetSource};
use dashboard::Dashboard;
use fixtures::catalog;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn dashboard() -> Dashboard {
    let session = OrgSession::new(catalog::organizations(), DEFAULT_SWITCH_LATENCY);
    Dashboard::new(
        session,
        Arc::new(MockFleetSource::seeded(FixtureCounts::default(), 42)),
    )
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

#[tokio::test]
async fn test_organizations_and_session() {
    let app = create_router(dashboard());

    let (status, body) = get(&app, "/api/v1/organizations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"][1]["slug"], "global-ind");

    let (status, body) = get(&app, "/api/v1/session").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"]["id"], "org-1");
    assert_eq!(body["loading"], false);
}

#[tokio::test]
async fn test_device_list_and_lookup() {
    let app = create_router(dashboard());

    let (status, body) = get(&app, "/api/v1/devices").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 50);
    assert_eq!(body["data"][0]["id"], "dev-org-1-0");
    assert_eq!(body["data"][0]["name"], "Device-0000");

    let (status, body) = get(&app, "/api/v1/devices/dev-org-1-12").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orgId"], "org-1");

    let (status, _) = get(&app, "/api/v1/devices/dev-org-1-999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_filter_round_trip_through_api() {
    let app = create_router(dashboard());

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/filter",
        Some(serde_json::json!({"status": "active", "search": "device-00"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");

    let (_, body) = get(&app, "/api/v1/devices").await;
    let devices = body["data"].as_array().unwrap();
    assert!(!devices.is_empty());
    for device in devices {
        assert_eq!(device["status"], "active");
        assert!(device["name"].as_str().unwrap().starts_with("Device-00"));
    }

    // Query parameters override the stored predicates for one request only
    let (_, body) = get(&app, "/api/v1/devices?status=all&search=").await;
    assert_eq!(body["total"], 50);

    let (_, body) = get(&app, "/api/v1/filter").await;
    assert_eq!(body["search"], "device-00");
}

#[tokio::test]
async fn test_stats_activity_telemetry() {
    let app = create_router(dashboard());

    let (_, stats) = get(&app, "/api/v1/stats").await;
    let total = stats["total"].as_u64().unwrap();
    let sum = stats["active"].as_u64().unwrap()
        + stats["inactive"].as_u64().unwrap()
        + stats["maintenance"].as_u64().unwrap();
    assert_eq!(total, 50);
    assert_eq!(sum, total);
    assert_eq!(stats["alerts24h"], 10);
    assert_eq!(stats["totalDevices"], 50);
    let avg = stats["avgSignal"].as_f64().unwrap();
    assert!((0.0..=4.0).contains(&avg));

    let (_, activity) = get(&app, "/api/v1/activity").await;
    assert_eq!(activity["total"], 10);
    let device_id = activity["data"][0]["deviceId"].as_str().unwrap();
    assert!(device_id.starts_with("dev-org-1-"));

    let (_, telemetry) = get(&app, "/api/v1/telemetry").await;
    assert_eq!(telemetry["total"], 24);
}

#[tokio::test]
async fn test_refresh_and_metrics() {
    let app = create_router(dashboard());

    let (status, body) = send(&app, Method::POST, "/api/v1/refresh", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["refreshed"], true);

    let (status, _) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_organization_is_soft_failure() {
    let app = create_router(dashboard());

    let (status, body) = send(&app, Method::POST, "/api/v1/session/organization/org-77", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scheduled"], false);

    let (_, session) = get(&app, "/api/v1/session").await;
    assert_eq!(session["current"]["id"], "org-1");
    assert_eq!(session["loading"], false);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_switches_end_on_last_organization() {
    let dashboard = dashboard();
    let sync = dashboard.spawn_sync();
    let app = create_router(dashboard.clone());

    let (status, _) = send(&app, Method::POST, "/api/v1/session/organization/org-2", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    tokio::time::sleep(Duration::from_millis(200)).await;
    let (status, _) = send(&app, Method::POST, "/api/v1/session/organization/org-3", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (_, session) = get(&app, "/api/v1/session").await;
    assert_eq!(session["loading"], true);

    // Refresh is suspended while the switch is pending
    let (_, body) = send(&app, Method::POST, "/api/v1/refresh", None).await;
    assert_eq!(body["refreshed"], false);

    dashboard.session().settled().await;
    for _ in 0..100 {
        if dashboard.organization().map(|o| o.id).as_deref() == Some("org-3") {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    // Well past the first switch's deadline
    tokio::time::sleep(Duration::from_secs(2)).await;

    let (_, session) = get(&app, "/api/v1/session").await;
    assert_eq!(session["current"]["id"], "org-3");
    assert_eq!(session["loading"], false);

    let (_, body) = get(&app, "/api/v1/devices").await;
    assert_eq!(body["total"], 50);
    for device in body["data"].as_array().unwrap() {
        assert_eq!(device["orgId"], "org-3");
    }

    sync.abort();
}

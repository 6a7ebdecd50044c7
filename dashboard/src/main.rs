use clap::Parser;
use dashboard::config::Config;
use dashboard::session::OrgSession;
use dashboard::source::{FleetSource, MockFleetSource};
use dashboard::{metrics, rest, Dashboard};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting fleet dashboard");
    info!(
        "Devices per org: {}, activity: {}, telemetry points: {}, switch latency: {}ms",
        config.devices_per_org,
        config.activity_count,
        config.telemetry_points,
        config.switch_latency_ms
    );

    if let Err(e) = metrics::init_metrics() {
        error!("Failed to register metrics: {}", e);
        std::process::exit(1);
    }

    let source: Arc<dyn FleetSource> = Arc::new(MockFleetSource::new(config.fixture_counts()));
    let session = OrgSession::new(source.organizations(), config.switch_latency());
    let dashboard = Dashboard::new(session, source);

    let sync_handle = dashboard.spawn_sync();

    let app = rest::create_router(dashboard);

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to bind to {}: {}", config.http_addr, e);
            std::process::exit(1);
        });

    info!("HTTP server listening on {}", config.http_addr);

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap_or_else(|e| {
            error!("HTTP server error: {}", e);
        });
    });

    tokio::select! {
        _ = sync_handle => {
            error!("Dashboard sync task terminated");
        }
        _ = server_handle => {
            error!("HTTP server terminated");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Shutting down");
}

use clap::Parser;
use fixtures::catalog;
use fixtures::model::{ActivityLog, Device, Organization, TelemetryPoint};
use fixtures::{generate_devices, generate_recent_activity, generate_telemetry};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Print a generated fixture snapshot for one organization as JSON.
#[derive(Debug, Parser)]
#[command(name = "fixtures", version)]
struct Args {
    /// Organization id; ids outside the catalog still generate devices.
    #[arg(long, env = "ORG_ID", default_value = "org-1")]
    org: String,

    #[arg(long, env = "DEVICES", default_value_t = 50)]
    devices: usize,

    #[arg(long, env = "ACTIVITY", default_value_t = 10)]
    activity: usize,

    #[arg(long, env = "TELEMETRY_POINTS", default_value_t = 24)]
    telemetry: usize,

    /// Seed for serial numbers, activity and telemetry. Random when absent.
    #[arg(long, env = "FIXTURE_SEED")]
    seed: Option<u64>,

    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    organization: Option<Organization>,
    devices: Vec<Device>,
    recent_activity: Vec<ActivityLog>,
    telemetry_history: Vec<TelemetryPoint>,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let organization = catalog::find_organization(&args.org);
    if organization.is_none() {
        warn!("Organization {} is not in the catalog, generating anyway", args.org);
    }

    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    info!(
        "Generating fixtures for {}: devices={}, activity={}, telemetry={}",
        args.org, args.devices, args.activity, args.telemetry
    );

    let devices = generate_devices(args.devices, &args.org, &mut rng);
    let recent_activity = generate_recent_activity(args.activity, &devices, &mut rng);
    let telemetry_history = generate_telemetry(args.telemetry, &mut rng);

    let snapshot = Snapshot {
        organization,
        devices,
        recent_activity,
        telemetry_history,
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    };

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize fixtures: {}", e);
            ExitCode::FAILURE
        }
    }
}

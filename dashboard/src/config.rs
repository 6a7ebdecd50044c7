use crate::source::FixtureCounts;
use clap::Parser;
use std::time::Duration;

/// Fleet dashboard API serving generated data.
#[derive(Debug, Clone, Parser)]
#[command(name = "dashboard", version)]
pub struct Config {
    #[arg(long, env = "HTTP_ADDR", default_value = "0.0.0.0:8080")]
    pub http_addr: String,

    #[arg(long, env = "DEVICES_PER_ORG", default_value_t = 50)]
    pub devices_per_org: usize,

    #[arg(long, env = "ACTIVITY_COUNT", default_value_t = 10)]
    pub activity_count: usize,

    #[arg(long, env = "TELEMETRY_POINTS", default_value_t = 24)]
    pub telemetry_points: usize,

    /// Simulated latency of an organization switch.
    #[arg(long, env = "SWITCH_LATENCY_MS", default_value_t = 500)]
    pub switch_latency_ms: u64,
}

impl Config {
    pub fn fixture_counts(&self) -> FixtureCounts {
        FixtureCounts {
            devices_per_org: self.devices_per_org,
            activity: self.activity_count,
            telemetry_points: self.telemetry_points,
        }
    }

    pub fn switch_latency(&self) -> Duration {
        Duration::from_millis(self.switch_latency_ms)
    }
}

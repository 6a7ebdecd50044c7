use crate::model::TelemetryPoint;
use chrono::{DateTime, Duration, Local, Utc};
use rand::Rng;

const PEAK_LOAD_FROM: usize = 12;

/// Hourly telemetry ending at the current hour, oldest first.
pub fn generate_telemetry(points: usize, rng: &mut impl Rng) -> Vec<TelemetryPoint> {
    generate_telemetry_at(points, Utc::now(), rng)
}

pub fn generate_telemetry_at(
    points: usize,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Vec<TelemetryPoint> {
    (0..points)
        .map(|i| {
            let at = now - Duration::hours((points - 1 - i) as i64);
            let phase = i as f64 / 5.0;
            let peak = if i > PEAK_LOAD_FROM { 50.0 } else { 0.0 };

            TelemetryPoint {
                time: at.with_timezone(&Local).format("%H:%M").to_string(),
                temp: 20.0 + rng.gen::<f64>() * 10.0 + phase.sin() * 5.0,
                humidity: 40.0 + rng.gen::<f64>() * 20.0 + phase.cos() * 10.0,
                power: 100.0 + rng.gen::<f64>() * 50.0 + peak,
            }
        })
        .collect()
}

use crate::devices::minutes;
use crate::model::{ActivityKind, ActivityLog, Device};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

pub const UNKNOWN_DEVICE_ID: &str = "unknown";
pub const UNKNOWN_DEVICE_NAME: &str = "Unknown Device";

const STEP_MINUTES: f64 = 15.0;
const JITTER_MINUTES: f64 = 10.0;

/// Recent activity feed, newest first, referencing random devices from `devices`.
///
/// An empty `devices` slice yields entries pointing at the unknown placeholder.
pub fn generate_recent_activity(
    count: usize,
    devices: &[Device],
    rng: &mut impl Rng,
) -> Vec<ActivityLog> {
    generate_recent_activity_at(count, devices, Utc::now(), rng)
}

pub fn generate_recent_activity_at(
    count: usize,
    devices: &[Device],
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Vec<ActivityLog> {
    (0..count)
        .map(|i| {
            let (device_id, device_name) = match devices.choose(rng) {
                Some(device) => (device.id.clone(), device.name.clone()),
                None => (UNKNOWN_DEVICE_ID.to_string(), UNKNOWN_DEVICE_NAME.to_string()),
            };
            let kind = ActivityKind::ALL[rng.gen_range(0..ActivityKind::ALL.len())];
            let messages = kind.messages();
            let message = messages[rng.gen_range(0..messages.len())];
            let offset = i as f64 * STEP_MINUTES + rng.gen::<f64>() * JITTER_MINUTES;

            ActivityLog {
                id: format!("log-{}", i),
                device_id,
                device_name,
                kind,
                message: message.to_string(),
                timestamp: now - minutes(offset),
            }
        })
        .collect()
}

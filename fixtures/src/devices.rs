use crate::model::{Device, DeviceKind, DeviceMetrics, DeviceStatus, GeoLocation};
use crate::prng::SeededRandom;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

pub const BASE_LAT: f64 = 40.7128;
pub const BASE_LNG: f64 = -74.006;

const ACTIVE_THRESHOLD: f64 = 0.15;
const ACTIVE_WINDOW_MINUTES: f64 = 10.0;
const OFFLINE_MIN_MINUTES: f64 = 60.0;
const OFFLINE_SPREAD_MINUTES: f64 = 10_000.0;
const SERIAL_LEN: usize = 9;
const SERIAL_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate `count` devices for `org_id`, last seen relative to now.
///
/// Every field except `serial_number` comes from the org-seeded stream; serials
/// are drawn from `noise`.
pub fn generate_devices(count: usize, org_id: &str, noise: &mut impl Rng) -> Vec<Device> {
    generate_devices_at(count, org_id, Utc::now(), noise)
}

pub fn generate_devices_at(
    count: usize,
    org_id: &str,
    now: DateTime<Utc>,
    noise: &mut impl Rng,
) -> Vec<Device> {
    let mut random = SeededRandom::for_org(org_id);
    (0..count)
        .map(|index| next_device(&mut random, noise, org_id, index, now))
        .collect()
}

// Draw order is part of the fixture contract: reordering changes every device
// after the first for a given org.
fn next_device(
    random: &mut SeededRandom,
    noise: &mut impl Rng,
    org_id: &str,
    index: usize,
    now: DateTime<Utc>,
) -> Device {
    let is_active = random.next_f64() > ACTIVE_THRESHOLD;
    let minutes_ago = if is_active {
        random.next_f64() * ACTIVE_WINDOW_MINUTES
    } else {
        OFFLINE_MIN_MINUTES + random.next_f64() * OFFLINE_SPREAD_MINUTES
    };
    let kind = DeviceKind::ALL[random.next_index(DeviceKind::ALL.len())];
    let status = if is_active {
        DeviceStatus::Active
    } else if random.next_f64() > 0.5 {
        DeviceStatus::Inactive
    } else {
        DeviceStatus::Maintenance
    };
    let firmware_version = format!("v{}.{}", random.next_index(5), random.next_index(10));
    let battery_level = random.next_index(100) as u8;
    let signal_strength = random.next_index(5) as u8;
    let location = GeoLocation {
        lat: BASE_LAT + (random.next_f64() - 0.5) * 0.1,
        lng: BASE_LNG + (random.next_f64() - 0.5) * 0.1,
    };
    let metrics = DeviceMetrics {
        temperature: 20.0 + random.next_f64() * 15.0,
        humidity: 30.0 + random.next_f64() * 40.0,
        pressure: 1000.0 + random.next_f64() * 50.0,
    };

    Device {
        id: format!("dev-{}-{}", org_id, index),
        org_id: org_id.to_string(),
        name: format!("Device-{:04}", index),
        serial_number: serial_number(noise),
        kind,
        status,
        last_seen: now - minutes(minutes_ago),
        firmware_version,
        battery_level,
        signal_strength,
        location,
        metrics,
    }
}

fn serial_number(noise: &mut impl Rng) -> String {
    let body: String = (0..SERIAL_LEN)
        .map(|_| SERIAL_ALPHABET[noise.gen_range(0..SERIAL_ALPHABET.len())] as char)
        .collect();
    format!("SN-{}", body)
}

pub(crate) fn minutes(value: f64) -> Duration {
    Duration::milliseconds((value * 60_000.0) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_fields(d: &Device) -> (String, DeviceKind, DeviceStatus, DateTime<Utc>, String, u8, u8) {
        (
            d.id.clone(),
            d.kind,
            d.status,
            d.last_seen,
            d.firmware_version.clone(),
            d.battery_level,
            d.signal_strength,
        )
    }

    #[test]
    fn test_org_1_draw_order_is_pinned() {
        let now = Utc::now();
        let devices = generate_devices_at(3, "org-1", now, &mut StdRng::seed_from_u64(0));

        let expected = [
            (DeviceStatus::Active, DeviceKind::Actuator, "v1.6", 15, 1, 333_333),
            (DeviceStatus::Active, DeviceKind::Gateway, "v1.3", 72, 1, 331_291),
            (DeviceStatus::Active, DeviceKind::Actuator, "v1.2", 63, 1, 425_828),
        ];
        for (device, (status, kind, firmware, battery, signal, age_ms)) in devices.iter().zip(expected) {
            assert_eq!(device.status, status, "{}", device.id);
            assert_eq!(device.kind, kind, "{}", device.id);
            assert_eq!(device.firmware_version, firmware, "{}", device.id);
            assert_eq!(device.battery_level, battery, "{}", device.id);
            assert_eq!(device.signal_strength, signal, "{}", device.id);
            assert_eq!((now - device.last_seen).num_milliseconds(), age_ms, "{}", device.id);
        }
    }

    #[test]
    fn test_fifty_devices_for_org_1() {
        let devices = generate_devices(50, "org-1", &mut rand::thread_rng());
        assert_eq!(devices.len(), 50);
        for (i, device) in devices.iter().enumerate() {
            assert_eq!(device.id, format!("dev-org-1-{}", i));
            assert_eq!(device.org_id, "org-1");
            assert_eq!(device.name, format!("Device-{:04}", i));
        }
    }

    #[test]
    fn test_seeded_fields_are_reproducible() {
        let now = Utc::now();
        let a = generate_devices_at(50, "org-1", now, &mut rand::thread_rng());
        let b = generate_devices_at(50, "org-1", now, &mut rand::thread_rng());

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(seeded_fields(x), seeded_fields(y));
            assert_eq!(x.location, y.location);
            assert_eq!(x.metrics, y.metrics);
        }
    }

    #[test]
    fn test_seeded_noise_makes_everything_reproducible() {
        let now = Utc::now();
        let a = generate_devices_at(20, "org-2", now, &mut StdRng::seed_from_u64(9));
        let b = generate_devices_at(20, "org-2", now, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_statuses_stable_across_calls() {
        let statuses = |devices: Vec<Device>| devices.into_iter().map(|d| d.status).collect::<Vec<_>>();
        let first = statuses(generate_devices(50, "org-1", &mut rand::thread_rng()));
        let second = statuses(generate_devices(50, "org-1", &mut rand::thread_rng()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_last_seen_matches_status() {
        let now = Utc::now();
        for org in ["org-1", "org-2", "org-3", "custom-tenant"] {
            for device in generate_devices_at(200, org, now, &mut rand::thread_rng()) {
                let age = now - device.last_seen;
                if device.status == DeviceStatus::Active {
                    assert!(age >= Duration::zero() && age <= Duration::minutes(10), "{:?}", device);
                } else {
                    assert!(age >= Duration::minutes(60), "{:?}", device);
                }
            }
        }
    }

    #[test]
    fn test_value_ranges() {
        for device in generate_devices(500, "org-3", &mut rand::thread_rng()) {
            assert!(device.battery_level < 100);
            assert!(device.signal_strength <= 4);
            assert!((device.location.lat - BASE_LAT).abs() <= 0.05);
            assert!((device.location.lng - BASE_LNG).abs() <= 0.05);
            assert!((20.0..35.0).contains(&device.metrics.temperature));
            assert!((30.0..70.0).contains(&device.metrics.humidity));
            assert!((1000.0..1050.0).contains(&device.metrics.pressure));
            assert!(device.firmware_version.starts_with('v'));
            assert!(device.serial_number.starts_with("SN-"));
            assert_eq!(device.serial_number.len(), 3 + SERIAL_LEN);
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(generate_devices(0, "org-1", &mut rand::thread_rng()).is_empty());
    }

    #[test]
    fn test_colliding_org_ids_share_device_set() {
        let now = Utc::now();
        let a = generate_devices_at(10, "org-12", now, &mut rand::thread_rng());
        let b = generate_devices_at(10, "org-21", now, &mut rand::thread_rng());
        let statuses = |d: &[Device]| d.iter().map(|x| x.status).collect::<Vec<_>>();
        assert_eq!(statuses(&a), statuses(&b));
        assert_ne!(a[0].id, b[0].id);
    }

    #[test]
    fn test_different_orgs_differ() {
        let now = Utc::now();
        let a = generate_devices_at(50, "org-1", now, &mut rand::thread_rng());
        let b = generate_devices_at(50, "org-2", now, &mut rand::thread_rng());
        let batteries = |d: &[Device]| d.iter().map(|x| x.battery_level).collect::<Vec<_>>();
        assert_ne!(batteries(&a), batteries(&b));
    }
}

use crate::errors::Result;
use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ORG_SWITCHES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "dashboard_org_switches_total",
        "Organization switches scheduled"
    ))
    .expect("valid metric opts");
    pub static ref ORG_SWITCHES_IGNORED_TOTAL: Counter = Counter::with_opts(Opts::new(
        "dashboard_org_switches_ignored_total",
        "Organization switches ignored because the id is not in the catalog"
    ))
    .expect("valid metric opts");
    pub static ref ORG_SWITCHES_SUPERSEDED_TOTAL: Counter = Counter::with_opts(Opts::new(
        "dashboard_org_switches_superseded_total",
        "Pending organization switches cancelled by a newer request"
    ))
    .expect("valid metric opts");
    pub static ref REGENERATIONS_TOTAL: Counter = Counter::with_opts(Opts::new(
        "dashboard_fixture_regenerations_total",
        "Times the fleet data was regenerated"
    ))
    .expect("valid metric opts");
    pub static ref INVALID_DEVICES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "dashboard_invalid_devices_total",
        "Devices dropped by validation during regeneration"
    ))
    .expect("valid metric opts");
    pub static ref DEVICES_LOADED: Gauge = Gauge::with_opts(Opts::new(
        "dashboard_devices_loaded",
        "Devices held for the current organization"
    ))
    .expect("valid metric opts");
    pub static ref REGENERATION_LATENCY_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "dashboard_regeneration_latency_seconds",
            "Time taken to regenerate fleet data"
        )
        .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5])
    )
    .expect("valid metric opts");
}

pub fn init_metrics() -> Result<()> {
    REGISTRY.register(Box::new(ORG_SWITCHES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(ORG_SWITCHES_IGNORED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(ORG_SWITCHES_SUPERSEDED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(REGENERATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(INVALID_DEVICES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(DEVICES_LOADED.clone()))?;
    REGISTRY.register(Box::new(REGENERATION_LATENCY_SECONDS.clone()))?;
    Ok(())
}

pub fn gather_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_metrics_are_exported() {
        init_metrics().unwrap();
        ORG_SWITCHES_TOTAL.inc();
        let text = gather_metrics().unwrap();
        assert!(text.contains("dashboard_org_switches_total"));
        assert!(text.contains("dashboard_devices_loaded"));

        // Registering twice is rejected rather than silently duplicated
        assert!(init_metrics().is_err());
    }
}

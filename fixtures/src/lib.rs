//! Synthetic fleet data: organization catalog, seeded device generation,
//! activity feed and telemetry history.

pub mod activity;
pub mod catalog;
pub mod devices;
pub mod model;
pub mod prng;
pub mod telemetry;

pub use activity::generate_recent_activity;
pub use devices::generate_devices;
pub use telemetry::generate_telemetry;

pub mod config;
pub mod errors;
pub mod filter;
pub mod metrics;
pub mod model;
pub mod rest;
pub mod session;
pub mod source;
pub mod state;
pub mod stats;
pub mod validate;

pub use state::{Dashboard, DashboardData};

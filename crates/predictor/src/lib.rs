pub mod api;
pub mod catalog;
pub mod compatibility;
pub mod metrics;

pub const SERVICE_NAME: &str = "DePIN Resource Predict API";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

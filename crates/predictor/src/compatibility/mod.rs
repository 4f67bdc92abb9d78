pub mod aggregator;
pub mod scorer;

pub use aggregator::{CompatibilityService, UpgradeCategory};
pub use scorer::score_project;

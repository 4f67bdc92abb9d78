pub mod api;
pub mod prediction;
pub mod project;
pub mod system;

pub use prediction::{CompatibilityResult, PerformanceRating, PredictionResponse};
pub use project::ProjectRequirement;
pub use system::{OperatingSystem, SystemRating, SystemSpec};

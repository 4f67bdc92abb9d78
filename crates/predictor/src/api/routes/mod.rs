pub mod docs;
pub mod health;
pub mod index;
pub mod metrics;
pub mod predict;
pub mod projects;

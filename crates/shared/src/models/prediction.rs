use crate::models::system::{SystemRating, SystemSpec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

pub const SCORE_EXCELLENT: f64 = 0.9;
pub const SCORE_GOOD: f64 = 0.7;
pub const SCORE_FAIR: f64 = 0.5;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum PerformanceRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PerformanceRating {
    pub fn from_score(score: f64) -> Self {
        if score >= SCORE_EXCELLENT {
            PerformanceRating::Excellent
        } else if score >= SCORE_GOOD {
            PerformanceRating::Good
        } else if score >= SCORE_FAIR {
            PerformanceRating::Fair
        } else {
            PerformanceRating::Poor
        }
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Outcome of scoring one system against one project.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CompatibilityResult {
    pub name: String,
    pub compatible: bool,
    pub compatibility_score: f64,
    pub performance_rating: PerformanceRating,
    pub estimated_cost: String,
    pub missing_requirements: Vec<String>,
    pub recommended_upgrades: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Validate)]
pub struct PredictionRequest {
    #[validate]
    pub system: SystemSpec,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PredictionSummary {
    pub total_projects: usize,
    pub compatible_count: usize,
    pub incompatible_count: usize,
    /// Percentage of compatible projects, 0-100.
    pub compatibility_rate: f64,
    pub average_score: f64,
    pub system_rating: SystemRating,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PredictionResponse {
    pub compatible_projects: Vec<CompatibilityResult>,
    pub incompatible_projects: Vec<CompatibilityResult>,
    pub summary: PredictionSummary,
    pub recommendations: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

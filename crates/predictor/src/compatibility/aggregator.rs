use crate::catalog::Catalog;
use crate::compatibility::scorer::score_project;
use chrono::{DateTime, Utc};
use log::debug;
use shared::models::prediction::{CompatibilityResult, PredictionResponse, PredictionSummary};
use shared::models::system::SystemSpec;

pub const ASSESSMENT_EXCELLENT: &str =
    "🎉 Excellent! Your system is compatible with most DePIN projects.";
pub const ASSESSMENT_GOOD: &str =
    "👍 Good compatibility! Your system works well with many DePIN projects.";
pub const ASSESSMENT_FAIR: &str =
    "⚠️ Fair compatibility. Consider upgrading for better project support.";
pub const ASSESSMENT_LIMITED: &str =
    "📈 Limited compatibility. Upgrades recommended for better DePIN support.";

const TOP_PROJECTS: usize = 3;

/// Hardware area a missing requirement points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeCategory {
    Ram,
    Cpu,
    Gpu,
    Storage,
    Network,
}

impl UpgradeCategory {
    pub const ALL: [UpgradeCategory; 5] = [
        UpgradeCategory::Ram,
        UpgradeCategory::Cpu,
        UpgradeCategory::Gpu,
        UpgradeCategory::Storage,
        UpgradeCategory::Network,
    ];

    /// First matching keyword wins, checked in `ALL` order, so
    /// "GPU VRAM: ..." counts as a RAM issue.
    pub fn classify(requirement: &str) -> Option<Self> {
        if requirement.contains("RAM") {
            Some(UpgradeCategory::Ram)
        } else if requirement.contains("CPU") {
            Some(UpgradeCategory::Cpu)
        } else if requirement.contains("GPU") {
            Some(UpgradeCategory::Gpu)
        } else if requirement.contains("Storage") || requirement.contains("SSD") {
            Some(UpgradeCategory::Storage)
        } else if requirement.contains("Network") {
            Some(UpgradeCategory::Network)
        } else {
            None
        }
    }

    pub const fn suggestion(&self) -> &'static str {
        match self {
            UpgradeCategory::Ram => "💾 Consider upgrading RAM for better project compatibility",
            UpgradeCategory::Cpu => "🖥️ A CPU upgrade would significantly improve project support",
            UpgradeCategory::Gpu => {
                "🎮 Adding a dedicated GPU would unlock AI and compute-intensive projects"
            }
            UpgradeCategory::Storage => {
                "💿 Consider upgrading to SSD storage or increasing capacity"
            }
            UpgradeCategory::Network => {
                "🌐 Faster internet connection would improve project compatibility"
            }
        }
    }

    const fn index(&self) -> usize {
        *self as usize
    }
}

/// Runs the scorer over a catalog and assembles the response.
pub struct CompatibilityService {
    catalog: Catalog,
}

impl CompatibilityService {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn predict(&self, system: &SystemSpec) -> PredictionResponse {
        self.predict_at(system, Utc::now())
    }

    pub fn predict_at(&self, system: &SystemSpec, generated_at: DateTime<Utc>) -> PredictionResponse {
        let mut compatible = Vec::new();
        let mut incompatible = Vec::new();
        let mut total_score = 0.0;

        for project in self.catalog.iter() {
            let result = score_project(system, project);
            total_score += result.compatibility_score;
            if result.compatible {
                compatible.push(result);
            } else {
                incompatible.push(result);
            }
        }

        sort_by_score(&mut compatible);
        sort_by_score(&mut incompatible);

        let total_projects = self.catalog.len();
        let summary = PredictionSummary {
            total_projects,
            compatible_count: compatible.len(),
            incompatible_count: incompatible.len(),
            compatibility_rate: compatible.len() as f64 / total_projects as f64 * 100.0,
            average_score: total_score / total_projects as f64,
            system_rating: system.rating(),
        };

        let recommendations = recommendations(&compatible, &incompatible, total_projects);

        debug!(
            "Prediction for [{}]: {}/{} compatible, average score {:.2}, rating {}",
            system,
            summary.compatible_count,
            summary.total_projects,
            summary.average_score,
            summary.system_rating
        );

        PredictionResponse {
            compatible_projects: compatible,
            incompatible_projects: incompatible,
            summary,
            recommendations,
            generated_at,
        }
    }
}

// Vec::sort_by is stable, so ties keep catalog order.
fn sort_by_score(results: &mut [CompatibilityResult]) {
    results.sort_by(|a, b| b.compatibility_score.total_cmp(&a.compatibility_score));
}

fn recommendations(
    compatible: &[CompatibilityResult],
    incompatible: &[CompatibilityResult],
    total_projects: usize,
) -> Vec<String> {
    let compatible_fraction = compatible.len() as f64 / total_projects as f64;

    let mut recommendations = vec![overall_assessment(compatible_fraction).to_string()];
    recommendations.extend(upgrade_needs(incompatible));

    if !compatible.is_empty() {
        let names: Vec<&str> = compatible
            .iter()
            .take(TOP_PROJECTS)
            .map(|result| result.name.as_str())
            .collect();
        recommendations.push(format!(
            "🚀 Recommended projects for your system: {}",
            names.join(", ")
        ));
    }

    recommendations
}

fn overall_assessment(compatible_fraction: f64) -> &'static str {
    if compatible_fraction >= 0.8 {
        ASSESSMENT_EXCELLENT
    } else if compatible_fraction >= 0.6 {
        ASSESSMENT_GOOD
    } else if compatible_fraction >= 0.4 {
        ASSESSMENT_FAIR
    } else {
        ASSESSMENT_LIMITED
    }
}

/// Suggests an upgrade for each category blocking more than a third of the
/// incompatible projects (floor division, so small sets trigger on any hit).
fn upgrade_needs(incompatible: &[CompatibilityResult]) -> Vec<String> {
    let mut counts = [0usize; UpgradeCategory::ALL.len()];
    for requirement in incompatible
        .iter()
        .flat_map(|result| result.missing_requirements.iter())
    {
        if let Some(category) = UpgradeCategory::classify(requirement) {
            counts[category.index()] += 1;
        }
    }

    let threshold = incompatible.len() / 3;
    UpgradeCategory::ALL
        .iter()
        .filter(|category| counts[category.index()] > threshold)
        .map(|category| category.suggestion().to_string())
        .collect()
}

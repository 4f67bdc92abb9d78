use shared::models::prediction::{CompatibilityResult, PerformanceRating};
use shared::models::project::{ProjectRequirement, StorageType};
use shared::models::system::SystemSpec;

pub const HOME_USE_WARNING: &str = "This project may not be suitable for home use";

const CPU_PENALTY: f64 = 0.3;
const RAM_PENALTY: f64 = 0.3;
const RAM_RECOMMENDED_PENALTY: f64 = 0.1;
const STORAGE_PENALTY: f64 = 0.2;
const SSD_PENALTY: f64 = 0.25;
const SSD_BONUS: f64 = 0.05;
const GPU_PENALTY: f64 = 0.4;
const GPU_VRAM_PENALTY: f64 = 0.3;
const NETWORK_PENALTY: f64 = 0.2;
const OS_PENALTY: f64 = 0.3;

const MAX_PERFORMANCE_BONUS: f64 = 0.15;

/// Per-call accumulator the dimension checks write into.
#[derive(Debug)]
struct Assessment {
    score: f64,
    compatible: bool,
    missing_requirements: Vec<String>,
    recommended_upgrades: Vec<String>,
}

impl Assessment {
    fn new() -> Self {
        Self {
            score: 1.0,
            compatible: true,
            missing_requirements: Vec::new(),
            recommended_upgrades: Vec::new(),
        }
    }

    fn fail(&mut self, penalty: f64, requirement: String) {
        self.compatible = false;
        self.missing_requirements.push(requirement);
        self.score -= penalty;
    }

    fn recommend(&mut self, penalty: f64, upgrade: String) {
        self.recommended_upgrades.push(upgrade);
        self.score -= penalty;
    }

    fn adjust(&mut self, delta: f64) {
        self.score += delta;
    }
}

type DimensionCheck = fn(&SystemSpec, &ProjectRequirement, &mut Assessment);

// Every check runs for every project; a failure never short-circuits the rest.
const DIMENSION_CHECKS: [DimensionCheck; 7] = [
    check_cpu,
    check_ram,
    check_storage_capacity,
    check_storage_type,
    check_gpu,
    check_network,
    check_os,
];

fn check_cpu(system: &SystemSpec, project: &ProjectRequirement, assessment: &mut Assessment) {
    if system.cpu_cores < project.cpu_cores_min {
        assessment.fail(
            CPU_PENALTY,
            format!(
                "CPU cores: need {}, have {}",
                project.cpu_cores_min, system.cpu_cores
            ),
        );
    }
}

fn check_ram(system: &SystemSpec, project: &ProjectRequirement, assessment: &mut Assessment) {
    if system.ram_gb < project.ram_gb_min {
        assessment.fail(
            RAM_PENALTY,
            format!(
                "RAM: need {}GB, have {}GB",
                project.ram_gb_min, system.ram_gb
            ),
        );
    } else if system.ram_gb < project.ram_gb_recommended {
        assessment.recommend(
            RAM_RECOMMENDED_PENALTY,
            format!(
                "RAM upgrade to {}GB recommended for optimal performance",
                project.ram_gb_recommended
            ),
        );
    }
}

fn check_storage_capacity(
    system: &SystemSpec,
    project: &ProjectRequirement,
    assessment: &mut Assessment,
) {
    if system.storage_gb < project.storage_gb_min {
        assessment.fail(
            STORAGE_PENALTY,
            format!(
                "Storage: need {}GB, have {}GB",
                project.storage_gb_min, system.storage_gb
            ),
        );
    }
}

fn check_storage_type(
    system: &SystemSpec,
    project: &ProjectRequirement,
    assessment: &mut Assessment,
) {
    if project.storage_type != StorageType::Ssd {
        return;
    }
    if system.has_ssd {
        assessment.adjust(SSD_BONUS);
    } else {
        assessment.fail(SSD_PENALTY, "SSD storage required".to_string());
    }
}

fn check_gpu(system: &SystemSpec, project: &ProjectRequirement, assessment: &mut Assessment) {
    if project.gpu_required && !system.has_gpu {
        assessment.fail(GPU_PENALTY, "Dedicated GPU required".to_string());
    } else if project.gpu_vram_gb_min > 0 && system.gpu_vram_gb < project.gpu_vram_gb_min {
        assessment.fail(
            GPU_VRAM_PENALTY,
            format!(
                "GPU VRAM: need {}GB, have {}GB",
                project.gpu_vram_gb_min, system.gpu_vram_gb
            ),
        );
    }
}

fn check_network(system: &SystemSpec, project: &ProjectRequirement, assessment: &mut Assessment) {
    if system.network_mbps < project.network_mbps_min {
        assessment.fail(
            NETWORK_PENALTY,
            format!(
                "Network speed: need {}Mbps, have {}Mbps",
                project.network_mbps_min, system.network_mbps
            ),
        );
    }
}

fn check_os(system: &SystemSpec, project: &ProjectRequirement, assessment: &mut Assessment) {
    if !project.supported_os.allows(system.os) {
        assessment.fail(
            OS_PENALTY,
            format!(
                "OS not supported: need one of [{}], have {}",
                project.supported_os, system.os
            ),
        );
    }
}

/// Bonus for headroom above the project's requirements, capped at +0.15.
pub fn performance_bonus(system: &SystemSpec, project: &ProjectRequirement) -> f64 {
    let mut bonus = 0.0;

    if system.cpu_cores > project.cpu_cores_min.saturating_mul(2) {
        bonus += 0.05;
    } else if system.cpu_cores > project.cpu_cores_min {
        bonus += 0.02;
    }

    if system.ram_gb > project.ram_gb_recommended.saturating_mul(2) {
        bonus += 0.05;
    } else if system.ram_gb > project.ram_gb_recommended {
        bonus += 0.02;
    }

    if system.network_mbps > project.network_mbps_min.saturating_mul(2) {
        bonus += 0.03;
    }

    if system.has_gpu && system.gpu_vram_gb > 8 {
        bonus += 0.02;
    }

    f64::min(bonus, MAX_PERFORMANCE_BONUS)
}

/// Scores one system against one project.
///
/// Penalties from every failing dimension accumulate before the performance
/// bonus is added and the result is clamped to `[0, 1]`. `compatible` tracks
/// whether any dimension failed and is independent of the final score.
pub fn score_project(system: &SystemSpec, project: &ProjectRequirement) -> CompatibilityResult {
    let mut assessment = DIMENSION_CHECKS
        .iter()
        .fold(Assessment::new(), |mut assessment, check| {
            check(system, project, &mut assessment);
            assessment
        });

    assessment.adjust(performance_bonus(system, project));
    let score = assessment.score.clamp(0.0, 1.0);

    let warnings = if project.home_friendly {
        Vec::new()
    } else {
        vec![HOME_USE_WARNING.to_string()]
    };

    CompatibilityResult {
        name: project.name.clone(),
        compatible: assessment.compatible,
        compatibility_score: score,
        performance_rating: PerformanceRating::from_score(score),
        estimated_cost: project.estimated_cost(),
        missing_requirements: assessment.missing_requirements,
        recommended_upgrades: assessment.recommended_upgrades,
        warnings,
    }
}

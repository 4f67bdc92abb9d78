use predictor::catalog::Catalog;
use predictor::compatibility::{score_project, CompatibilityService};
use proptest::prelude::*;
use shared::models::prediction::PerformanceRating;
use shared::models::project::{ProjectRequirement, StorageType, SupportedOs};
use shared::models::system::{OperatingSystem, SystemSpec};

const EPSILON: f64 = 1e-9;

fn operating_system() -> impl Strategy<Value = OperatingSystem> {
    prop::sample::select(OperatingSystem::ALL.to_vec())
}

prop_compose! {
    fn system_spec()(
        cpu_cores in 1u32..=64,
        ram_gb in 1u32..=128,
        storage_gb in 32u32..=8192,
        has_ssd in any::<bool>(),
        has_gpu in any::<bool>(),
        gpu_vram_gb in 0u32..=48,
        network_mbps in 1u32..=10_000,
        os in operating_system(),
    ) -> SystemSpec {
        SystemSpec {
            cpu_cores,
            ram_gb,
            storage_gb,
            has_ssd,
            has_gpu,
            gpu_vram_gb,
            network_mbps,
            os,
        }
    }
}

prop_compose! {
    fn project()(
        name in "[A-Z][a-z]{2,10}",
        cpu_cores_min in 0u32..=64,
        ram_gb_min in 0u32..=256,
        ram_headroom in 0u32..=256,
        storage_gb_min in 0u32..=20_000,
        needs_ssd in any::<bool>(),
        gpu_required in any::<bool>(),
        gpu_vram_gb_min in 0u32..=48,
        network_mbps_min in 0u32..=2_000,
        os_mask in 0usize..8,
        home_friendly in any::<bool>(),
    ) -> ProjectRequirement {
        let supported: Vec<&str> = OperatingSystem::ALL
            .iter()
            .enumerate()
            .filter(|(bit, _)| os_mask & (1 << bit) != 0)
            .map(|(_, os)| os.as_str())
            .collect();
        ProjectRequirement {
            name,
            cpu_cores_min,
            ram_gb_min,
            ram_gb_recommended: ram_gb_min + ram_headroom,
            storage_gb_min,
            storage_type: if needs_ssd { StorageType::Ssd } else { StorageType::Any },
            gpu_required,
            gpu_vram_gb_min,
            network_mbps_min,
            supported_os: supported.join(",").parse::<SupportedOs>().unwrap(),
            home_friendly,
            ..Default::default()
        }
    }
}

fn score(system: &SystemSpec, project: &ProjectRequirement) -> f64 {
    score_project(system, project).compatibility_score
}

proptest! {
    #[test]
    fn score_stays_in_unit_interval(system in system_spec(), project in project()) {
        let result = score_project(&system, &project);
        prop_assert!((0.0..=1.0).contains(&result.compatibility_score));
        prop_assert_eq!(
            result.performance_rating,
            PerformanceRating::from_score(result.compatibility_score)
        );
    }

    #[test]
    fn compatible_iff_nothing_missing(system in system_spec(), project in project()) {
        let result = score_project(&system, &project);
        prop_assert_eq!(result.compatible, result.missing_requirements.is_empty());
        prop_assert_eq!(result.warnings.is_empty(), project.home_friendly);
    }

    #[test]
    fn more_cpu_never_lowers_score(system in system_spec(), project in project(), extra in 0u32..64) {
        let upgraded = SystemSpec {
            cpu_cores: (system.cpu_cores + extra).min(64),
            ..system.clone()
        };
        prop_assert!(score(&upgraded, &project) + EPSILON >= score(&system, &project));
    }

    #[test]
    fn more_ram_never_lowers_score(system in system_spec(), project in project(), extra in 0u32..128) {
        let upgraded = SystemSpec {
            ram_gb: (system.ram_gb + extra).min(128),
            ..system.clone()
        };
        prop_assert!(score(&upgraded, &project) + EPSILON >= score(&system, &project));
    }

    #[test]
    fn faster_network_never_lowers_score(system in system_spec(), project in project(), extra in 0u32..10_000) {
        let upgraded = SystemSpec {
            network_mbps: (system.network_mbps + extra).min(10_000),
            ..system.clone()
        };
        prop_assert!(score(&upgraded, &project) + EPSILON >= score(&system, &project));
    }

    #[test]
    fn more_storage_never_lowers_score(system in system_spec(), project in project(), extra in 0u32..8192) {
        let upgraded = SystemSpec {
            storage_gb: (system.storage_gb + extra).min(8192),
            ..system.clone()
        };
        prop_assert!(score(&upgraded, &project) + EPSILON >= score(&system, &project));
    }

    #[test]
    fn adding_ssd_never_lowers_score(system in system_spec(), project in project()) {
        let upgraded = SystemSpec { has_ssd: true, ..system.clone() };
        prop_assert!(score(&upgraded, &project) + EPSILON >= score(&system, &project));
    }

    #[test]
    fn prediction_partitions_catalog(
        system in system_spec(),
        projects in prop::collection::vec(project(), 1..20),
    ) {
        let total = projects.len();
        let service = CompatibilityService::new(Catalog::new(projects).unwrap());
        let response = service.predict(&system);
        let summary = &response.summary;

        prop_assert_eq!(summary.total_projects, total);
        prop_assert_eq!(summary.compatible_count + summary.incompatible_count, total);
        prop_assert_eq!(response.compatible_projects.len(), summary.compatible_count);
        prop_assert!(response.compatible_projects.iter().all(|r| r.compatible));
        prop_assert!(response.incompatible_projects.iter().all(|r| !r.compatible));
        prop_assert!((0.0..=100.0).contains(&summary.compatibility_rate));
        prop_assert!((0.0..=1.0 + EPSILON).contains(&summary.average_score));
        prop_assert_eq!(summary.system_rating, system.rating());
        prop_assert!(!response.recommendations.is_empty());

        for list in [&response.compatible_projects, &response.incompatible_projects] {
            prop_assert!(list
                .windows(2)
                .all(|pair| pair[0].compatibility_score >= pair[1].compatibility_score));
        }
    }

    #[test]
    fn top_projects_line_lists_at_most_three(
        system in system_spec(),
        projects in prop::collection::vec(project(), 1..20),
    ) {
        let service = CompatibilityService::new(Catalog::new(projects).unwrap());
        let response = service.predict(&system);
        let top = response
            .recommendations
            .iter()
            .find_map(|r| r.strip_prefix("🚀 Recommended projects for your system: "));

        match top {
            Some(names) => {
                prop_assert!(!response.compatible_projects.is_empty());
                let expected: Vec<&str> = response
                    .compatible_projects
                    .iter()
                    .take(3)
                    .map(|r| r.name.as_str())
                    .collect();
                prop_assert_eq!(names, expected.join(", "));
            }
            None => prop_assert!(response.compatible_projects.is_empty()),
        }
    }
}

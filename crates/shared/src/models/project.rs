use crate::models::system::OperatingSystem;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Storage medium a project asks for.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub enum StorageType {
    #[serde(rename = "SSD")]
    Ssd,
    #[default]
    Any,
}

impl From<&str> for StorageType {
    // Only an exact "SSD" marks a hard SSD requirement; anything else is treated as "Any".
    fn from(value: &str) -> Self {
        match value {
            "SSD" => StorageType::Ssd,
            _ => StorageType::Any,
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::Ssd => write!(f, "SSD"),
            StorageType::Any => write!(f, "Any"),
        }
    }
}

/// Operating systems a project runs on. An empty list places no restriction.
///
/// Serialized as the comma-joined list used by the catalog source, e.g.
/// `"Linux,Windows,macOS"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupportedOs(Vec<String>);

impl SupportedOs {
    pub fn unrestricted() -> Self {
        Self(Vec::new())
    }

    pub fn all_known() -> Self {
        Self(
            OperatingSystem::ALL
                .iter()
                .map(|os| os.as_str().to_string())
                .collect(),
        )
    }

    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-sensitive exact match against each listed entry.
    pub fn allows(&self, os: OperatingSystem) -> bool {
        self.is_unrestricted() || self.0.iter().any(|entry| entry == os.as_str())
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    fn from_list(s: &str) -> Self {
        if s.is_empty() {
            return Self::unrestricted();
        }
        Self(s.split(',').map(|os| os.trim().to_string()).collect())
    }
}

impl FromStr for SupportedOs {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_list(s))
    }
}

impl fmt::Display for SupportedOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

impl Serialize for SupportedOs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SupportedOs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_list(&raw))
    }
}

/// Operating envelope of one DePIN project, as loaded from the catalog.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct ProjectRequirement {
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub node_type: String,
    pub cpu_cores_min: u32,
    pub ram_gb_min: u32,
    pub ram_gb_recommended: u32,
    pub storage_gb_min: u32,
    pub storage_type: StorageType,
    pub gpu_required: bool,
    pub gpu_vram_gb_min: u32,
    pub network_mbps_min: u32,
    pub supported_os: SupportedOs,
    pub estimated_cost_min: u32,
    pub estimated_cost_max: u32,
    pub cost_category: String,
    pub home_friendly: bool,
    pub description: String,
}

impl ProjectRequirement {
    pub fn estimated_cost(&self) -> String {
        format!(
            "${}-${}/month",
            self.estimated_cost_min, self.estimated_cost_max
        )
    }
}

/// Breakdown of the loaded catalog.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct ProjectSummary {
    pub by_type: BTreeMap<String, usize>,
    pub by_cost_category: BTreeMap<String, usize>,
    pub home_friendly: usize,
    pub gpu_required: usize,
}

impl ProjectSummary {
    pub fn from_projects<'a>(projects: impl IntoIterator<Item = &'a ProjectRequirement>) -> Self {
        let mut summary = ProjectSummary::default();
        for project in projects {
            *summary
                .by_type
                .entry(project.project_type.clone())
                .or_default() += 1;
            *summary
                .by_cost_category
                .entry(project.cost_category.clone())
                .or_default() += 1;
            if project.home_friendly {
                summary.home_friendly += 1;
            }
            if project.gpu_required {
                summary.gpu_required += 1;
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_supported_os_parse_and_match() {
        let supported: SupportedOs = "Linux, Windows ,macOS".parse().unwrap();
        assert_eq!(supported.entries(), &["Linux", "Windows", "macOS"]);
        assert!(supported.allows(OperatingSystem::Windows));
        assert!(supported.allows(OperatingSystem::MacOs));

        let linux_only: SupportedOs = "Linux".parse().unwrap();
        assert!(linux_only.allows(OperatingSystem::Linux));
        assert!(!linux_only.allows(OperatingSystem::Windows));
    }

    #[test]
    fn test_supported_os_is_case_sensitive() {
        let supported: SupportedOs = "linux,windows,macos".parse().unwrap();
        for os in OperatingSystem::ALL {
            assert!(!supported.allows(os));
        }
    }

    #[test]
    fn test_empty_supported_os_allows_everything() {
        let supported: SupportedOs = "".parse().unwrap();
        assert!(supported.is_unrestricted());
        for os in OperatingSystem::ALL {
            assert!(supported.allows(os));
        }
    }

    #[test]
    fn test_supported_os_serializes_as_joined_string() {
        let supported = SupportedOs::all_known();
        assert_eq!(
            serde_json::to_value(&supported).unwrap(),
            json!("Linux,Windows,macOS")
        );
        let back: SupportedOs = serde_json::from_value(json!("Linux,Windows,macOS")).unwrap();
        assert_eq!(back, supported);
    }

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!(StorageType::from("SSD"), StorageType::Ssd);
        assert_eq!(StorageType::from("Any"), StorageType::Any);
        assert_eq!(StorageType::from("ssd"), StorageType::Any);
        assert_eq!(StorageType::from(""), StorageType::Any);
    }

    #[test]
    fn test_estimated_cost_format() {
        let project = ProjectRequirement {
            name: "Helium".to_string(),
            estimated_cost_min: 5,
            estimated_cost_max: 15,
            ..Default::default()
        };
        assert_eq!(project.estimated_cost(), "$5-$15/month");
    }

    #[test]
    fn test_project_serializes_type_field() {
        let project = ProjectRequirement {
            name: "Render".to_string(),
            project_type: "Compute".to_string(),
            storage_type: StorageType::Ssd,
            ..Default::default()
        };
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["type"], json!("Compute"));
        assert_eq!(value["storage_type"], json!("SSD"));
        assert_eq!(value["supported_os"], json!(""));
    }

    #[test]
    fn test_project_summary_counts() {
        let projects = vec![
            ProjectRequirement {
                name: "a".to_string(),
                project_type: "Storage".to_string(),
                cost_category: "Low".to_string(),
                home_friendly: true,
                ..Default::default()
            },
            ProjectRequirement {
                name: "b".to_string(),
                project_type: "Compute".to_string(),
                cost_category: "High".to_string(),
                gpu_required: true,
                ..Default::default()
            },
            ProjectRequirement {
                name: "c".to_string(),
                project_type: "Storage".to_string(),
                cost_category: "Low".to_string(),
                home_friendly: true,
                ..Default::default()
            },
        ];

        let summary = ProjectSummary::from_projects(&projects);
        assert_eq!(summary.by_type.get("Storage"), Some(&2));
        assert_eq!(summary.by_type.get("Compute"), Some(&1));
        assert_eq!(summary.by_cost_category.get("Low"), Some(&2));
        assert_eq!(summary.home_friendly, 2);
        assert_eq!(summary.gpu_required, 1);
    }
}

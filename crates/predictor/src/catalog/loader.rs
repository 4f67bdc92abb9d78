use crate::catalog::Catalog;
use csv::{ReaderBuilder, StringRecord};
use log::{info, warn};
use shared::models::project::{ProjectRequirement, StorageType, SupportedOs};
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

const NAME: &[&str] = &["project_name", "name"];
const PROJECT_TYPE: &[&str] = &["project_type", "type"];
const NODE_TYPE: &[&str] = &["node_type"];
const CPU_CORES_MIN: &[&str] = &["cpu_cores_min"];
const RAM_GB_MIN: &[&str] = &["ram_gb_min", "ram_min_gb"];
const RAM_GB_RECOMMENDED: &[&str] = &["ram_gb_recommended", "ram_recommended_gb"];
const STORAGE_GB_MIN: &[&str] = &["storage_gb_min", "storage_min_gb"];
const STORAGE_TYPE: &[&str] = &["storage_type"];
const GPU_REQUIRED: &[&str] = &["gpu_required"];
const GPU_VRAM_GB_MIN: &[&str] = &["gpu_vram_gb_min", "gpu_vram_min_gb"];
const NETWORK_MBPS_MIN: &[&str] = &["network_speed_mbps_min", "network_mbps_min"];
const SUPPORTED_OS: &[&str] = &["supported_os", "os_support"];
const COST_MIN: &[&str] = &["estimated_monthly_cost_usd_min", "cost_min"];
const COST_MAX: &[&str] = &["estimated_monthly_cost_usd_max", "cost_max"];
const COST_CATEGORY: &[&str] = &["cost_category"];
const HOME_FRIENDLY: &[&str] = &["home_friendly"];
const DESCRIPTION: &[&str] = &["description", "additional_requirements"];

const MAX_CPU_CORES: i64 = 64;
const MAX_RAM_GB: i64 = 1024;
const MAX_STORAGE_GB: i64 = 100_000;
const MAX_NETWORK_MBPS: i64 = 100_000;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to open catalog {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Failed to read catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("Catalog has no {0} column")]
    MissingHeader(&'static str),
    #[error("Catalog contains no valid projects")]
    Empty,
}

/// Why a single catalog row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("project name is required")]
    MissingName,
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
    #[error("{field} is not a usable number: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Column positions keyed by normalized header name.
struct Columns(HashMap<String, usize>);

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(index, header)| (normalize_header(header), index))
            .collect();
        Columns(columns)
    }

    fn has_any(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|alias| self.0.contains_key(*alias))
    }

    /// First non-empty value among the aliases, trimmed.
    fn get<'r>(&self, record: &'r StringRecord, aliases: &[&str]) -> &'r str {
        aliases
            .iter()
            .filter_map(|alias| self.0.get(*alias))
            .filter_map(|&index| record.get(index))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    fn parse_record(&self, record: &StringRecord) -> Result<ProjectRequirement, RecordError> {
        let name = self.get(record, NAME);
        if name.is_empty() {
            return Err(RecordError::MissingName);
        }

        let estimated_cost_max = parse_u32("estimated_cost_max", self.get(record, COST_MAX))?;
        let cost_category = match self.get(record, COST_CATEGORY) {
            "" => cost_category_for(estimated_cost_max).to_string(),
            category => category.to_string(),
        };
        let supported_os = match self.get(record, SUPPORTED_OS) {
            "" => SupportedOs::all_known(),
            list => list.parse::<SupportedOs>().unwrap_or_default(),
        };

        Ok(ProjectRequirement {
            name: name.to_string(),
            project_type: or_default(self.get(record, PROJECT_TYPE), "Unknown"),
            node_type: or_default(self.get(record, NODE_TYPE), "Standard"),
            cpu_cores_min: parse_bounded(
                "cpu_cores_min",
                self.get(record, CPU_CORES_MIN),
                MAX_CPU_CORES,
            )?,
            ram_gb_min: parse_bounded("ram_gb_min", self.get(record, RAM_GB_MIN), MAX_RAM_GB)?,
            ram_gb_recommended: parse_u32(
                "ram_gb_recommended",
                self.get(record, RAM_GB_RECOMMENDED),
            )?,
            storage_gb_min: parse_bounded(
                "storage_gb_min",
                self.get(record, STORAGE_GB_MIN),
                MAX_STORAGE_GB,
            )?,
            storage_type: StorageType::from(self.get(record, STORAGE_TYPE)),
            gpu_required: parse_bool(self.get(record, GPU_REQUIRED)),
            gpu_vram_gb_min: parse_u32("gpu_vram_gb_min", self.get(record, GPU_VRAM_GB_MIN))?,
            network_mbps_min: parse_bounded(
                "network_mbps_min",
                self.get(record, NETWORK_MBPS_MIN),
                MAX_NETWORK_MBPS,
            )?,
            supported_os,
            estimated_cost_min: parse_u32("estimated_cost_min", self.get(record, COST_MIN))?,
            estimated_cost_max,
            cost_category,
            home_friendly: parse_bool(self.get(record, HOME_FRIENDLY)),
            description: self.get(record, DESCRIPTION).to_string(),
        })
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn cost_category_for(estimated_cost_max: u32) -> &'static str {
    match estimated_cost_max {
        0..=20 => "Low",
        21..=100 => "Medium",
        _ => "High",
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_uppercase().as_str(),
        "TRUE" | "1" | "YES" | "Y"
    )
}

// Text that is not a number at all reads as 0; a number too large to
// represent is rejected instead of silently zeroed.
fn parse_int(field: &'static str, value: &str) -> Result<i64, RecordError> {
    match value.parse::<i64>() {
        Ok(parsed) => Ok(parsed),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(RecordError::InvalidNumber {
                field,
                value: value.to_string(),
            })
        }
        Err(_) => Ok(0),
    }
}

fn parse_bounded(field: &'static str, value: &str, max: i64) -> Result<u32, RecordError> {
    let parsed = parse_int(field, value)?;
    if !(0..=max).contains(&parsed) {
        return Err(RecordError::OutOfRange {
            field,
            value: parsed,
        });
    }
    u32::try_from(parsed).map_err(|_| RecordError::OutOfRange {
        field,
        value: parsed,
    })
}

fn parse_u32(field: &'static str, value: &str) -> Result<u32, RecordError> {
    parse_bounded(field, value, i64::from(u32::MAX))
}

/// Reads a project catalog from a CSV file.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = load_from_reader(file)?;
    info!(
        "Loaded {} projects from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Reads a project catalog from CSV data.
///
/// The first row names the columns; rows that fail validation are skipped
/// with a warning. Fails when no row survives.
pub fn load_from_reader<R: io::Read>(reader: R) -> Result<Catalog, CatalogError> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns::from_headers(csv_reader.headers()?);
    if !columns.has_any(NAME) {
        return Err(CatalogError::MissingHeader("project_name"));
    }

    let mut projects = Vec::new();
    let mut skipped = 0usize;
    for record in csv_reader.records() {
        let record = record?;
        match columns.parse_record(&record) {
            Ok(project) => projects.push(project),
            Err(e) => {
                skipped += 1;
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                warn!("Skipping catalog line {line}: {e}");
            }
        }
    }

    if skipped > 0 {
        info!("Skipped {skipped} invalid catalog rows");
    }
    Catalog::new(projects)
}

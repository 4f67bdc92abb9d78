use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Operating systems a prediction request may declare.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum OperatingSystem {
    Windows,
    Linux,
    #[serde(rename = "macOS")]
    MacOs,
}

impl OperatingSystem {
    pub const ALL: [OperatingSystem; 3] = [
        OperatingSystem::Linux,
        OperatingSystem::Windows,
        OperatingSystem::MacOs,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OperatingSystem::Windows => "Windows",
            OperatingSystem::Linux => "Linux",
            OperatingSystem::MacOs => "macOS",
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatingSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Windows" => Ok(OperatingSystem::Windows),
            "Linux" => Ok(OperatingSystem::Linux),
            "macOS" => Ok(OperatingSystem::MacOs),
            _ => Err(format!(
                "Invalid operating system: {s}. Use 'Windows', 'Linux' or 'macOS'"
            )),
        }
    }
}

/// Hardware description of the machine being evaluated.
///
/// Range checks mirror what the API accepts; the scoring code assumes a spec
/// that already passed `validate()`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Validate)]
pub struct SystemSpec {
    #[validate(range(min = 1, max = 64))]
    pub cpu_cores: u32,
    #[validate(range(min = 1, max = 128))]
    pub ram_gb: u32,
    #[validate(range(min = 32, max = 8192))]
    pub storage_gb: u32,
    #[serde(default)]
    pub has_ssd: bool,
    #[serde(default)]
    pub has_gpu: bool,
    #[serde(default)]
    #[validate(range(max = 48))]
    pub gpu_vram_gb: u32,
    #[validate(range(min = 1, max = 10000))]
    pub network_mbps: u32,
    pub os: OperatingSystem,
}

impl SystemSpec {
    pub fn rating(&self) -> SystemRating {
        SystemRating::for_spec(self)
    }
}

impl fmt::Display for SystemSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cores, {}GB RAM, {}GB {}, ",
            self.cpu_cores,
            self.ram_gb,
            self.storage_gb,
            if self.has_ssd { "SSD" } else { "HDD" }
        )?;
        if self.has_gpu {
            write!(f, "GPU {}GB VRAM, ", self.gpu_vram_gb)?;
        } else {
            write!(f, "no GPU, ")?;
        }
        write!(f, "{}Mbps, {}", self.network_mbps, self.os)
    }
}

/// Coarse capability tier of a machine, independent of any project.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SystemRating {
    #[serde(rename = "Entry Level")]
    EntryLevel,
    #[serde(rename = "Mid-Range")]
    MidRange,
    #[serde(rename = "High-End")]
    HighEnd,
    Extreme,
}

impl SystemRating {
    pub fn for_spec(spec: &SystemSpec) -> Self {
        let points = Self::points(spec);
        match points {
            p if p >= 12 => SystemRating::Extreme,
            p if p >= 8 => SystemRating::HighEnd,
            p if p >= 5 => SystemRating::MidRange,
            _ => SystemRating::EntryLevel,
        }
    }

    fn points(spec: &SystemSpec) -> u32 {
        let cpu = match spec.cpu_cores {
            c if c >= 12 => 3,
            c if c >= 8 => 2,
            c if c >= 4 => 1,
            _ => 0,
        };

        let ram = match spec.ram_gb {
            r if r >= 32 => 3,
            r if r >= 16 => 2,
            r if r >= 8 => 1,
            _ => 0,
        };

        let gpu = match (spec.has_gpu, spec.gpu_vram_gb) {
            (true, v) if v >= 12 => 3,
            (true, v) if v >= 6 => 2,
            (true, _) => 1,
            (false, _) => 0,
        };

        let storage = if spec.has_ssd && spec.storage_gb >= 1000 {
            2
        } else if spec.has_ssd || spec.storage_gb >= 500 {
            1
        } else {
            0
        };

        let network = match spec.network_mbps {
            n if n >= 500 => 2,
            n if n >= 100 => 1,
            _ => 0,
        };

        cpu + ram + gpu + storage + network
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            SystemRating::EntryLevel => "Entry Level",
            SystemRating::MidRange => "Mid-Range",
            SystemRating::HighEnd => "High-End",
            SystemRating::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for SystemRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

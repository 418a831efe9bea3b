use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Industry classification for A-share issuers.
///
/// Every record carries exactly one industry; unknown codes classify as
/// `Other` so the screening engine never sees an absent classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Banking,
    Baijiu,
    Technology,
    Pharmaceutical,
    Consumer,
    NewEnergy,
    RealEstate,
    Brokerage,
    Other,
}

impl Industry {
    pub const ALL: [Self; 9] = [
        Self::Banking,
        Self::Baijiu,
        Self::Technology,
        Self::Pharmaceutical,
        Self::Consumer,
        Self::NewEnergy,
        Self::RealEstate,
        Self::Brokerage,
        Self::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Banking => "banking",
            Self::Baijiu => "baijiu",
            Self::Technology => "technology",
            Self::Pharmaceutical => "pharmaceutical",
            Self::Consumer => "consumer",
            Self::NewEnergy => "new_energy",
            Self::RealEstate => "real_estate",
            Self::Brokerage => "brokerage",
            Self::Other => "other",
        }
    }
}

impl Display for Industry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Industry {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "banking" => Ok(Self::Banking),
            "baijiu" => Ok(Self::Baijiu),
            "technology" => Ok(Self::Technology),
            "pharmaceutical" => Ok(Self::Pharmaceutical),
            "consumer" => Ok(Self::Consumer),
            "new_energy" => Ok(Self::NewEnergy),
            "real_estate" => Ok(Self::RealEstate),
            "brokerage" => Ok(Self::Brokerage),
            "other" => Ok(Self::Other),
            other => Err(ValidationError::InvalidIndustry {
                value: other.to_owned(),
            }),
        }
    }
}

/// Concept tags drawn from a fixed enumeration; synthetic records pick one
/// deterministically from the symbol seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concept {
    NewEnergy,
    ArtificialIntelligence,
    FiveG,
    Semiconductor,
    NewMaterials,
    Biotech,
}

impl Concept {
    pub const ALL: [Self; 6] = [
        Self::NewEnergy,
        Self::ArtificialIntelligence,
        Self::FiveG,
        Self::Semiconductor,
        Self::NewMaterials,
        Self::Biotech,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewEnergy => "new_energy",
            Self::ArtificialIntelligence => "artificial_intelligence",
            Self::FiveG => "5g",
            Self::Semiconductor => "semiconductor",
            Self::NewMaterials => "new_materials",
            Self::Biotech => "biotech",
        }
    }
}

impl Display for Concept {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical provider identifiers used in provenance tags and envelopes.
///
/// `Synthetic` marks batches fabricated by the generator after the real
/// provider chain was exhausted (or was skipped in offline mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Sina,
    Tencent,
    Eastmoney,
    Synthetic,
}

impl ProviderId {
    pub const ALL: [Self; 4] = [Self::Sina, Self::Tencent, Self::Eastmoney, Self::Synthetic];

    /// Real upstream providers in default priority order.
    pub const REAL: [Self; 3] = [Self::Sina, Self::Tencent, Self::Eastmoney];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sina => "sina",
            Self::Tencent => "tencent",
            Self::Eastmoney => "eastmoney",
            Self::Synthetic => "synthetic",
        }
    }

    pub const fn is_synthetic(self) -> bool {
        matches!(self, Self::Synthetic)
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sina" => Ok(Self::Sina),
            "tencent" => Ok(Self::Tencent),
            "eastmoney" => Ok(Self::Eastmoney),
            "synthetic" => Ok(Self::Synthetic),
            other => Err(ValidationError::InvalidSource {
                value: other.to_owned(),
            }),
        }
    }
}

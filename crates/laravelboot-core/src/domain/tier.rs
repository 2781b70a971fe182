//! Feature tiers.
//!
//! Every optional feature belongs to exactly one tier. Tiers always run in
//! the fixed order given by [`Tier::ALL`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A grouping of related features with a shared aggregate entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Platform,
    Infrastructure,
    Enterprise,
}

impl Tier {
    /// Execution order used by every entry point.
    pub const ALL: [Tier; 3] = [Tier::Platform, Tier::Infrastructure, Tier::Enterprise];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Infrastructure => "infrastructure",
            Self::Enterprise => "enterprise",
        }
    }

    /// Name of the pseudo-feature that runs every feature of this tier.
    pub const fn aggregate_name(&self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Infrastructure => "infra",
            Self::Enterprise => "enterprise",
        }
    }

    /// Short label used in progress output.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Platform => "feature",
            Self::Infrastructure => "infra",
            Self::Enterprise => "enterprise feature",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "platform" => Ok(Self::Platform),
            "infra" | "infrastructure" => Ok(Self::Infrastructure),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(DomainError::InvalidValue {
                field: "tier",
                value: other.to_string(),
            }),
        }
    }
}

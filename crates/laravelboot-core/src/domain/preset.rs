//! Named presets and configuration resolution.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::domain::configuration::{
    ArchitectureStyle, AuthKind, Configuration, Database, names,
};
use crate::domain::error::DomainError;

/// A canned configuration selectable by name on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Saas,
    Fintech,
    Enterprise,
    All,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Saas, Preset::Fintech, Preset::Enterprise, Preset::All];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Saas => "saas",
            Self::Fintech => "fintech",
            Self::Enterprise => "enterprise",
            Self::All => "all",
        }
    }

    /// The configuration this preset stands for. The project name is left
    /// empty; it is overlaid by the caller.
    pub fn configuration(&self) -> Configuration {
        let full_platform = names(&["roles", "media", "search", "activity-log"]);
        let full_infra = names(&["docker", "security", "rate-limit", "health"]);
        let full_enterprise = names(&["quality", "pro-arch", "docs-pro", "ci", "monitoring"]);

        let (auth, platform, enterprise) = match self {
            Self::Saas => (AuthKind::Sanctum, full_platform, Vec::new()),
            Self::Fintech => (
                AuthKind::Passport,
                names(&["roles", "activity-log"]),
                Vec::new(),
            ),
            Self::Enterprise => (AuthKind::Sanctum, full_platform, full_enterprise),
            Self::All => (AuthKind::Passport, full_platform, full_enterprise),
        };

        Configuration {
            project_name: String::new(),
            database: Database::Postgres,
            auth: Some(auth),
            platform,
            infra: full_infra,
            enterprise,
            architecture: ArchitectureStyle::DomainBased,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidValue {
                field: "preset",
                value: s.to_string(),
            })
    }
}

/// Where a resolved configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    Preset(Preset),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("config file"),
            Self::Preset(p) => write!(f, "preset '{p}'"),
            Self::Defaults => f.write_str("defaults"),
        }
    }
}

/// Pick the configuration for a run: a persisted file wins, then a named
/// preset, then the defaults. The project name is overlaid last.
///
/// An unrecognised preset name falls back to the defaults with a warning.
pub fn resolve_configuration(
    persisted: Option<Configuration>,
    preset: Option<&str>,
    project_name: &str,
) -> (Configuration, ConfigSource) {
    let (config, source) = match (persisted, preset) {
        (Some(cfg), _) => (cfg, ConfigSource::File),
        (None, Some(name)) => match name.parse::<Preset>() {
            Ok(p) => (p.configuration(), ConfigSource::Preset(p)),
            Err(_) => {
                warn!(preset = %name, "Unknown preset, using defaults");
                (Configuration::default(), ConfigSource::Defaults)
            }
        },
        (None, None) => (Configuration::default(), ConfigSource::Defaults),
    };
    (config.with_project_name(project_name), source)
}

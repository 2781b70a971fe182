//! Project configuration value objects.
//!
//! A [`Configuration`] is built once per invocation (persisted file, preset,
//! or defaults), gets the target project name overlaid, and is read-only
//! afterwards.
//!
//! Feature names are plain strings on purpose: they are checked against the
//! registries when a tier runs, never at load time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, tier::Tier};

// ── Database ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    Mysql,
    Postgres,
    Sqlite,
    Mongo,
}

impl Database {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
            Self::Mongo => "mongo",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::Mysql),
            "postgres" | "postgresql" | "pgsql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            "mongo" | "mongodb" => Ok(Self::Mongo),
            other => Err(DomainError::InvalidValue {
                field: "database",
                value: other.to_string(),
            }),
        }
    }
}

// ── AuthKind ─────────────────────────────────────────────────────────────────

/// API authentication driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthKind {
    #[default]
    Sanctum,
    Passport,
}

impl AuthKind {
    pub const ALL: [AuthKind; 2] = [AuthKind::Sanctum, AuthKind::Passport];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sanctum => "sanctum",
            Self::Passport => "passport",
        }
    }
}

impl fmt::Display for AuthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sanctum" => Ok(Self::Sanctum),
            "passport" => Ok(Self::Passport),
            other => Err(DomainError::InvalidValue {
                field: "auth",
                value: other.to_string(),
            }),
        }
    }
}

// ── ArchitectureStyle ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchitectureStyle {
    #[default]
    DomainBased,
    Standard,
}

impl ArchitectureStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DomainBased => "domain-based",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for ArchitectureStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchitectureStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "domain-based" | "domain" | "ddd" => Ok(Self::DomainBased),
            "standard" => Ok(Self::Standard),
            other => Err(DomainError::InvalidValue {
                field: "architecture",
                value: other.to_string(),
            }),
        }
    }
}

// ── Configuration ────────────────────────────────────────────────────────────

/// Everything a `new` run needs to know about the project it builds.
///
/// The serialised form is the `.laravelboot.yaml` document. Missing keys take
/// their defaults so hand-written files can stay short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub project_name: String,

    #[serde(default)]
    pub database: Database,

    /// `None` skips the auth stage entirely.
    #[serde(default)]
    pub auth: Option<AuthKind>,

    /// Platform features. Stored under `features` for compatibility with
    /// existing config files.
    #[serde(default, rename = "features", alias = "platform")]
    pub platform: Vec<String>,

    #[serde(default)]
    pub infra: Vec<String>,

    #[serde(default)]
    pub enterprise: Vec<String>,

    #[serde(default)]
    pub architecture: ArchitectureStyle,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            project_name: "myapp".into(),
            database: Database::Mysql,
            auth: Some(AuthKind::Sanctum),
            platform: names(&["roles", "media"]),
            infra: names(&["docker", "security", "health"]),
            enterprise: names(&["quality"]),
            architecture: ArchitectureStyle::DomainBased,
        }
    }
}

impl Configuration {
    /// Overlay the target project name.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Raw feature list for a tier, as written in the file.
    pub fn tier_features(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Platform => &self.platform,
            Tier::Infrastructure => &self.infra,
            Tier::Enterprise => &self.enterprise,
        }
    }

    /// Features enabled for a tier in declared order, duplicates dropped.
    /// Names are kept verbatim; lookup is exact.
    pub fn features(&self, tier: Tier) -> Vec<&str> {
        let mut seen = Vec::new();
        for name in self.tier_features(tier) {
            if !seen.contains(&name.as_str()) {
                seen.push(name.as_str());
            }
        }
        seen
    }

    /// Replace a tier's feature list.
    pub fn set_features(&mut self, tier: Tier, features: Vec<String>) {
        match tier {
            Tier::Platform => self.platform = features,
            Tier::Infrastructure => self.infra = features,
            Tier::Enterprise => self.enterprise = features,
        }
    }
}

pub(crate) fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_baseline() {
        let cfg = Configuration::default();
        assert_eq!(cfg.project_name, "myapp");
        assert_eq!(cfg.database, Database::Mysql);
        assert_eq!(cfg.auth, Some(AuthKind::Sanctum));
        assert_eq!(cfg.features(Tier::Platform), vec!["roles", "media"]);
        assert_eq!(
            cfg.features(Tier::Infrastructure),
            vec!["docker", "security", "health"]
        );
        assert_eq!(cfg.features(Tier::Enterprise), vec!["quality"]);
        assert_eq!(cfg.architecture, ArchitectureStyle::DomainBased);
    }

    #[test]
    fn features_drop_duplicates_keeping_first_order() {
        let mut cfg = Configuration::default();
        cfg.set_features(
            Tier::Platform,
            names(&["media", "roles", "media", "roles", "search"]),
        );
        assert_eq!(cfg.features(Tier::Platform), vec!["media", "roles", "search"]);
    }

    #[test]
    fn feature_names_are_not_normalised() {
        let yaml = "features: [\" roles\", roles, Media]\n";
        let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.features(Tier::Platform), vec![" roles", "roles", "Media"]);
    }

    #[test]
    fn project_name_overlay_keeps_everything_else() {
        let cfg = Configuration::default().with_project_name("demo");
        assert_eq!(cfg.project_name, "demo");
        assert_eq!(cfg.infra, Configuration::default().infra);
    }

    #[test]
    fn yaml_uses_legacy_feature_key_and_defaults_missing_fields() {
        let yaml = "project_name: shop\nauth: passport\nfeatures: [roles]\n";
        let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.project_name, "shop");
        assert_eq!(cfg.auth, Some(AuthKind::Passport));
        assert_eq!(cfg.platform, vec!["roles".to_string()]);
        assert!(cfg.infra.is_empty());
        assert_eq!(cfg.database, Database::Mysql);
    }

    #[test]
    fn yaml_round_trip_writes_features_key() {
        let text = serde_yaml::to_string(&Configuration::default()).unwrap();
        assert!(text.contains("features:"));
        assert!(text.contains("architecture: domain-based"));
    }

    #[test]
    fn parses_database_aliases() {
        assert_eq!("PostgreSQL".parse::<Database>().unwrap(), Database::Postgres);
        assert!("oracle".parse::<Database>().is_err());
    }
}

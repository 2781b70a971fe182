//! Feature registries.
//!
//! One registration table per tier: feature name to ordered steps. The
//! tier's aggregate entry ("platform", "infra", "enterprise") is never
//! registered; it is derived from the table on lookup.

use std::collections::HashMap;

use crate::application::ApplicationError;
use crate::application::step::StepRef;
use crate::domain::{AuthKind, DomainError, Tier};

/// Registered features of one tier, in declaration order.
#[derive(Debug)]
pub struct FeatureRegistry {
    tier: Tier,
    entries: Vec<(String, Vec<StepRef>)>,
}

impl FeatureRegistry {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            entries: Vec::new(),
        }
    }

    /// Register a feature at the end of the tier's order.
    ///
    /// The name must be new, must not collide with the tier's aggregate
    /// name, and must map to at least one step.
    pub fn register(
        mut self,
        name: impl Into<String>,
        steps: Vec<StepRef>,
    ) -> Result<Self, ApplicationError> {
        let name = name.into();
        let reason = if name.trim().is_empty() {
            Some("name is empty")
        } else if name == self.tier.aggregate_name() {
            Some("name is reserved for the tier aggregate")
        } else if self.contains(&name) {
            Some("already registered")
        } else if steps.is_empty() {
            Some("no steps")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(ApplicationError::Registration {
                tier: self.tier,
                name,
                reason,
            });
        }
        self.entries.push((name, steps));
        Ok(self)
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Registered feature names in order, without the aggregate.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Whether `name` is a registered feature (the aggregate excluded).
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Whether `name` resolves in this tier (the aggregate included).
    pub fn knows(&self, name: &str) -> bool {
        name == self.tier.aggregate_name() || self.contains(name)
    }

    /// Steps of one feature, or of the whole tier for the aggregate name.
    /// Exact match only.
    pub fn resolve(&self, name: &str) -> Result<Vec<StepRef>, DomainError> {
        if name == self.tier.aggregate_name() {
            return Ok(self
                .entries
                .iter()
                .flat_map(|(_, steps)| steps.iter().cloned())
                .collect());
        }
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, steps)| steps.clone())
            .ok_or_else(|| DomainError::UnknownFeature {
                tier: self.tier,
                name: name.to_string(),
            })
    }
}

/// All steps the orchestration knows about.
#[derive(Debug)]
pub struct FeatureCatalog {
    scaffold: Vec<StepRef>,
    auth: HashMap<AuthKind, Vec<StepRef>>,
    platform: FeatureRegistry,
    infrastructure: FeatureRegistry,
    enterprise: FeatureRegistry,
}

impl FeatureCatalog {
    /// `scaffold` runs right after project creation, fatal on failure.
    pub fn new(
        scaffold: Vec<StepRef>,
        platform: FeatureRegistry,
        infrastructure: FeatureRegistry,
        enterprise: FeatureRegistry,
    ) -> Result<Self, ApplicationError> {
        for (registry, tier) in [
            (&platform, Tier::Platform),
            (&infrastructure, Tier::Infrastructure),
            (&enterprise, Tier::Enterprise),
        ] {
            if registry.tier() != tier {
                return Err(ApplicationError::Registration {
                    tier,
                    name: registry.tier().aggregate_name().to_string(),
                    reason: "registry filed under the wrong tier",
                });
            }
        }
        Ok(Self {
            scaffold,
            auth: HashMap::new(),
            platform,
            infrastructure,
            enterprise,
        })
    }

    pub fn with_auth(mut self, kind: AuthKind, steps: Vec<StepRef>) -> Self {
        self.auth.insert(kind, steps);
        self
    }

    pub fn scaffold_steps(&self) -> &[StepRef] {
        &self.scaffold
    }

    /// Steps for an auth driver; empty when none were registered.
    pub fn auth_steps(&self, kind: AuthKind) -> &[StepRef] {
        self.auth.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn registry(&self, tier: Tier) -> &FeatureRegistry {
        match tier {
            Tier::Platform => &self.platform,
            Tier::Infrastructure => &self.infrastructure,
            Tier::Enterprise => &self.enterprise,
        }
    }

    /// The tier that resolves `name`, aggregates included.
    pub fn owner_of(&self, name: &str) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|tier| self.registry(*tier).knows(name))
    }
}

//! Tier execution.
//!
//! A [`TierManager`] runs features of one tier. Within a feature, steps run
//! in order and the first failure aborts the feature. Across features the
//! caller picks the policy.

use std::fmt;

use tracing::{debug, info, instrument, warn};

use crate::application::context::ExecutionContext;
use crate::application::registry::FeatureRegistry;
use crate::domain::Tier;
use crate::error::{BootError, BootResult};

/// What to do when one feature of a list fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing feature and return its error.
    FailFast,
    /// Warn, record the failure, move on to the next feature.
    Continue,
}

/// Where a recorded failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Auth,
    Tier(Tier),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth => f.write_str("auth"),
            Self::Tier(tier) => write!(f, "{tier}"),
        }
    }
}

/// A feature that failed under [`FailurePolicy::Continue`].
#[derive(Debug, Clone)]
pub struct FeatureFailure {
    pub stage: Stage,
    pub feature: String,
    pub error: BootError,
}

impl fmt::Display for FeatureFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.stage, self.feature, self.error)
    }
}

/// Outcome of running a list of features.
#[derive(Debug, Clone, Default)]
pub struct TierReport {
    pub completed: Vec<String>,
    pub failures: Vec<FeatureFailure>,
}

impl TierReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the features of a single tier.
pub struct TierManager<'c> {
    registry: &'c FeatureRegistry,
}

impl<'c> TierManager<'c> {
    pub fn new(registry: &'c FeatureRegistry) -> Self {
        Self { registry }
    }

    pub fn tier(&self) -> Tier {
        self.registry.tier()
    }

    /// Run one feature (or the tier aggregate), fail-fast.
    ///
    /// An unknown name fails before any step runs.
    #[instrument(skip_all, fields(tier = %self.tier(), feature = %name))]
    pub fn run_step(&self, name: &str, ctx: &ExecutionContext<'_>) -> BootResult<()> {
        let steps = self.registry.resolve(name)?;
        ctx.reporter()
            .progress(&format!("Adding {}: {name}", self.tier().label()));

        for step in &steps {
            debug!(step = step.name(), "Step started");
            step.execute(ctx)?;
            debug!(step = step.name(), "Step finished");
        }
        info!(steps = steps.len(), "Feature complete");
        Ok(())
    }

    /// Run several features in the given order.
    ///
    /// With [`FailurePolicy::FailFast`] the first failure is returned. With
    /// [`FailurePolicy::Continue`] every failure is reported as a warning and
    /// collected, and the call itself always succeeds.
    pub fn run_features(
        &self,
        names: &[&str],
        ctx: &ExecutionContext<'_>,
        policy: FailurePolicy,
    ) -> BootResult<TierReport> {
        let mut report = TierReport::default();
        for name in names {
            match self.run_step(name, ctx) {
                Ok(()) => report.completed.push((*name).to_string()),
                Err(err) if policy == FailurePolicy::FailFast => return Err(err),
                Err(err) => {
                    let failure = FeatureFailure {
                        stage: Stage::Tier(self.tier()),
                        feature: (*name).to_string(),
                        error: err,
                    };
                    warn!(tier = %self.tier(), feature = %name, error = %failure.error, "Feature failed, continuing");
                    ctx.reporter().warning(&format!(
                        "{} {name} failed: {}",
                        self.tier().label(),
                        failure.error
                    ));
                    report.failures.push(failure);
                }
            }
        }
        Ok(report)
    }
}

//! API authentication setup.

use tracing::{debug, instrument};

use crate::application::context::ExecutionContext;
use crate::application::registry::FeatureCatalog;
use crate::domain::AuthKind;
use crate::error::BootResult;

/// Runs the auth step list for one driver, fail-fast.
pub struct AuthManager<'c> {
    catalog: &'c FeatureCatalog,
}

impl<'c> AuthManager<'c> {
    pub fn new(catalog: &'c FeatureCatalog) -> Self {
        Self { catalog }
    }

    #[instrument(skip_all, fields(auth = %kind))]
    pub fn add_auth(&self, kind: AuthKind, ctx: &ExecutionContext<'_>) -> BootResult<()> {
        ctx.reporter().progress(&format!("Setting up auth: {kind}"));
        for step in self.catalog.auth_steps(kind) {
            debug!(step = step.name(), "Step started");
            step.execute(ctx)?;
        }
        Ok(())
    }
}

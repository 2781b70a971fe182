//! Post-processing plugin hooks.

use std::error::Error;
use std::path::Path;

use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::application::context::ExecutionContext;
use crate::domain::Configuration;

pub type PluginResult = Result<(), Box<dyn Error + Send + Sync>>;

/// A collaborator run once after every tier, before docs are written.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    fn install(&self, config: &Configuration, project: &Path) -> PluginResult;
}

/// Ordered list of plugins.
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.name())
    }

    /// Run every plugin in registration order; the first failure stops the
    /// run. In dry-run plugins are reported, not invoked.
    #[instrument(skip_all, fields(plugins = self.plugins.len()))]
    pub fn run(
        &self,
        config: &Configuration,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), ApplicationError> {
        for plugin in &self.plugins {
            if ctx.is_dry_run() {
                ctx.reporter()
                    .planned(&format!("Would run plugin: {}", plugin.name()));
                continue;
            }
            debug!(plugin = plugin.name(), "Running plugin");
            plugin
                .install(config, ctx.root())
                .map_err(|e| ApplicationError::Plugin {
                    plugin: plugin.name().to_string(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }
}

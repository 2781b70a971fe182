use std::path::Path;

use laravelboot_core::application::{Plugin, PluginResult};
use laravelboot_core::domain::{Configuration, Tier};
use tracing::info;

/// Logs a summary once the project is set up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPlugin;

impl Plugin for LogPlugin {
    fn name(&self) -> &str {
        "Logger"
    }

    fn install(&self, config: &Configuration, project: &Path) -> PluginResult {
        let features: usize = Tier::ALL.iter().map(|t| config.features(*t).len()).sum();
        info!(
            project = %config.project_name,
            path = %project.display(),
            features,
            "Setup complete for {}",
            config.project_name
        );
        Ok(())
    }
}

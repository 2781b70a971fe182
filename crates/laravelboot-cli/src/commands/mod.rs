//! Command handlers, one module per subcommand.
//!
//! Handlers turn parsed arguments into calls on the core [`StackComposer`]
//! and render the outcome. No orchestration logic lives here.

use laravelboot_adapters::{LocalFilesystem, SystemCommandRunner, YamlConfigStore, catalog, plugins};
use laravelboot_core::error::BootError;
use laravelboot_core::prelude::{Ports, StackComposer};

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

pub mod add;
pub mod completions;
pub mod init;
pub mod list;
pub mod new;
pub mod update;
pub mod version;

/// A composer wired to the real disk, real processes and the terminal.
pub(crate) fn composer(config: &AppConfig, output: &OutputManager) -> CliResult<StackComposer> {
    let ports = Ports {
        filesystem: Box::new(LocalFilesystem::new()),
        runner: Box::new(SystemCommandRunner::new()),
        reporter: Box::new(output.clone()),
        config_store: Box::new(YamlConfigStore::with_file_name(
            config.project.config_file.clone(),
        )),
    };
    let catalog = catalog::builtin().map_err(BootError::from)?;
    Ok(StackComposer::new(catalog, ports, plugins::builtin()))
}

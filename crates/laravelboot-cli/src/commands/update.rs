//! `laravelboot update`: replace the installed binary with the latest
//! release.

use tracing::instrument;

use crate::{cli::GlobalArgs, config::AppConfig, error::CliResult, output::OutputManager, update};

#[instrument(skip_all)]
pub fn execute(global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    update::self_update(&config.update, global.dry_run, &output)
}

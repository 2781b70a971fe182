//! `laravelboot add`: install one feature into the project in the current
//! directory.

use std::env;

use tracing::{info, instrument};

use crate::{
    cli::{AddArgs, GlobalArgs},
    commands,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
    update,
};

/// Execute the `laravelboot add` command. The first failing step fails the
/// whole command.
#[instrument(skip_all, fields(feature = %args.feature))]
pub fn execute(
    args: AddArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    if !global.dry_run {
        update::spawn_check(&config.update);
    }

    let root = env::current_dir().with_cli_context(|| "reading the current directory")?;
    let composer = commands::composer(&config, &output)?;

    output.info(&format!("Adding feature: {}", args.feature))?;
    composer.add(&args.feature, &root, global.dry_run)?;
    info!(feature = %args.feature, "Feature added");

    if global.dry_run {
        output.success(&format!("Dry run for '{}' complete, nothing was changed", args.feature))?;
    } else {
        output.success(&format!("Feature '{}' added successfully", args.feature))?;
    }
    Ok(())
}

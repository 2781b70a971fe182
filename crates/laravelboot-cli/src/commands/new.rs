//! Implementation of the `laravelboot new` command.
//!
//! Validates the project name, starts the background release check and
//! hands the run to [`StackComposer::create`](laravelboot_core::prelude::StackComposer::create).
//! Feature failures do not fail the command; they are listed at the end.

use std::env;

use tracing::{info, instrument};

use laravelboot_core::prelude::CreateRequest;

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    commands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    update,
};

/// Execute the `laravelboot new` command.
#[instrument(skip_all, fields(project = %args.project))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    validate_project_name(&args.project)?;

    if !global.dry_run {
        update::spawn_check(&config.update);
    }

    let workdir = env::current_dir().with_cli_context(|| "reading the current directory")?;
    let request = CreateRequest {
        name: args.project.clone(),
        preset: args.preset().map(str::to_owned),
        workdir,
        dry_run: global.dry_run,
    };

    let composer = commands::composer(&config, &output)?;
    let report = composer.create(&request)?;

    info!(
        completed = report.completed.len(),
        failed = report.failures.len(),
        source = ?report.source,
        "Create finished"
    );

    if !report.is_clean() {
        output.print("")?;
        output.warning(&format!(
            "{} feature(s) could not be installed:",
            report.failures.len()
        ))?;
        for failure in &report.failures {
            output.print(&format!("  {failure}"))?;
        }
        output.print(&format!(
            "Retry them later with: cd {} && laravelboot add <feature>",
            args.project
        ))?;
    }

    if !global.dry_run && !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", args.project))?;
        output.print("  php artisan serve")?;
    }

    Ok(())
}

// ── Validation ────────────────────────────────────────────────────────────────

/// The project name becomes a directory under the current one.
fn validate_project_name(name: &str) -> CliResult<()> {
    let invalid = |reason: &str| CliError::InvalidProjectName {
        name: name.into(),
        reason: reason.into(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("name cannot start with '.'"));
    }
    if name.contains(['/', '\\']) {
        return Err(invalid("name cannot contain path separators"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(invalid(&format!("character '{c}' is not allowed")));
    }
    Ok(())
}

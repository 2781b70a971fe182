//! `laravelboot init`: write a `.laravelboot.yaml` in the current directory.

use std::env;

use tracing::instrument;

use laravelboot_core::prelude::{Configuration, Tier};

use crate::{
    cli::{GlobalArgs, InitArgs},
    commands,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Create a project configuration, by prompt or from defaults.
#[instrument(skip_all, fields(defaults = args.defaults, force = args.force))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let dir = env::current_dir().with_cli_context(|| "reading the current directory")?;
    let path = config.project_file(&dir);

    // Bail early if the file already exists and --force was not given.
    if path.exists() && !args.force {
        output.warning(&format!(
            "Configuration already exists at {}  (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }

    let composer = commands::composer(&config, &output)?;
    let project = if args.defaults {
        Configuration::default()
    } else {
        let enterprise: Vec<String> = composer
            .catalog()
            .registry(Tier::Enterprise)
            .features()
            .map(str::to_owned)
            .collect();
        prompt::run(&output, enterprise)?
    };

    if global.dry_run {
        output.planned(&format!("Would create file: {}", path.display()))?;
        return Ok(());
    }

    let saved = composer.init(&dir, &project)?;
    output.success(&format!(
        "Configuration saved to {}",
        saved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| saved.display().to_string())
    ))?;
    Ok(())
}

#[cfg(feature = "interactive")]
mod prompt {
    use std::io;

    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

    use laravelboot_core::prelude::{AuthKind, Configuration, Database};

    use crate::{
        error::{CliError, CliResult},
        output::OutputManager,
    };

    const DATABASES: [Database; 3] = [Database::Mysql, Database::Postgres, Database::Sqlite];

    pub(super) fn run(output: &OutputManager, enterprise: Vec<String>) -> CliResult<Configuration> {
        let mut config = Configuration::default();
        let theme = ColorfulTheme::default();

        output.header("\u{1f680} Welcome to LaravelBoot Interactive Setup")?;

        config.project_name = Input::<String>::with_theme(&theme)
            .with_prompt("Project name")
            .default(config.project_name.clone())
            .interact_text()
            .map_err(prompt_error)?;

        let databases: Vec<&str> = DATABASES.iter().map(Database::as_str).collect();
        let db = Select::with_theme(&theme)
            .with_prompt("Database")
            .items(&databases)
            .default(0)
            .interact()
            .map_err(prompt_error)?;
        config.database = DATABASES[db];

        let drivers: Vec<&str> = AuthKind::ALL.iter().map(AuthKind::as_str).collect();
        let auth = Select::with_theme(&theme)
            .with_prompt("Auth")
            .items(&drivers)
            .default(0)
            .interact()
            .map_err(prompt_error)?;
        config.auth = Some(AuthKind::ALL[auth]);

        let full = Confirm::with_theme(&theme)
            .with_prompt("Enable Enterprise Stack (quality, CI, monitoring, pro-arch)?")
            .default(false)
            .interact()
            .map_err(prompt_error)?;
        if full {
            config.enterprise = enterprise;
        }

        Ok(config)
    }

    fn prompt_error(err: dialoguer::Error) -> CliError {
        match err {
            dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => CliError::Cancelled,
            other => CliError::IoError {
                message: "reading the answer".into(),
                source: other.into(),
            },
        }
    }
}

#[cfg(not(feature = "interactive"))]
mod prompt {
    use laravelboot_core::prelude::Configuration;

    use crate::{
        error::{CliError, CliResult},
        output::OutputManager,
    };

    pub(super) fn run(_output: &OutputManager, _enterprise: Vec<String>) -> CliResult<Configuration> {
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }
}

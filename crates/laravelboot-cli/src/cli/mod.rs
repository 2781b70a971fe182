//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};
use laravelboot_core::domain::Tier;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "laravelboot",
    bin_name = "laravelboot",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f680} Config-driven Laravel API bootstrapper",
    long_about = "LaravelBoot creates a Laravel API project and layers auth, platform, \
                  infrastructure and enterprise features on top of it.",
    after_help = "EXAMPLES:\n\
        \x20 laravelboot init\n\
        \x20 laravelboot new shop saas\n\
        \x20 laravelboot new bank --enterprise --dry-run\n\
        \x20 laravelboot add docker\n\
        \x20 laravelboot add all",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new Laravel project.
    #[command(
        visible_alias = "n",
        about = "Create a new Laravel project",
        after_help = "PRESETS: saas, fintech, enterprise, all\n\n\
            A .laravelboot.yaml in the current directory wins over any preset.\n\n\
            EXAMPLES:\n\
            \x20 laravelboot new shop\n\
            \x20 laravelboot new shop fintech\n\
            \x20 laravelboot new shop --all"
    )]
    New(NewArgs),

    /// Add a feature to the project in the current directory.
    #[command(
        about = "Add a feature to an existing project",
        after_help = "FEATURES:\n\
            \x20 auth                                      Sanctum or Passport, per .laravelboot.yaml\n\
            \x20 roles, media, activity-log, search, platform\n\
            \x20 docker, security, rate-limit, health, infra\n\
            \x20 quality, pro-arch, docs-pro, ci, monitoring, enterprise\n\
            \x20 all                                       Everything above"
    )]
    Add(AddArgs),

    /// Write a `.laravelboot.yaml` in the current directory.
    #[command(
        about = "Create a project configuration file",
        after_help = "EXAMPLES:\n\
            \x20 laravelboot init             # interactive\n\
            \x20 laravelboot init --defaults  # no prompts"
    )]
    Init(InitArgs),

    /// Update LaravelBoot to the latest release.
    #[command(about = "Update LaravelBoot")]
    Update,

    /// Print the version.
    #[command(about = "Show version")]
    Version,

    /// List the features that can be added.
    #[command(
        visible_alias = "ls",
        about = "List available features",
        after_help = "EXAMPLES:\n\
            \x20 laravelboot list\n\
            \x20 laravelboot list --tier infra\n\
            \x20 laravelboot list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 laravelboot completions bash > ~/.local/share/bash-completion/completions/laravelboot\n\
            \x20 laravelboot completions zsh  > ~/.zfunc/_laravelboot\n\
            \x20 laravelboot completions fish > ~/.config/fish/completions/laravelboot.fish"
    )]
    Completions(CompletionsArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `laravelboot new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Name of the project directory to create.
    #[arg(value_name = "PROJECT", help = "Project name")]
    pub project: String,

    /// Preset applied when there is no `.laravelboot.yaml`.
    #[arg(value_name = "PRESET", help = "Preset: saas, fintech, enterprise, all")]
    pub preset: Option<String>,

    /// Shortcut for the `all` preset.
    #[arg(long = "all", conflicts_with = "enterprise", help = "Use the 'all' preset")]
    pub all: bool,

    /// Shortcut for the `enterprise` preset.
    #[arg(long = "enterprise", help = "Use the 'enterprise' preset")]
    pub enterprise: bool,
}

impl NewArgs {
    /// The preset to apply; the flags win over the positional value.
    pub fn preset(&self) -> Option<&str> {
        if self.all {
            Some("all")
        } else if self.enterprise {
            Some("enterprise")
        } else {
            self.preset.as_deref()
        }
    }
}

// ── add ───────────────────────────────────────────────────────────────────────

/// Arguments for `laravelboot add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Feature, tier name, `auth` or `all`.
    #[arg(value_name = "FEATURE", help = "Feature to add (see --help)")]
    pub feature: String,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `laravelboot init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write the default configuration without asking.
    #[arg(long = "defaults", short = 'd', help = "Skip prompts and use defaults")]
    pub defaults: bool,

    /// Overwrite an existing configuration file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `laravelboot list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show one tier.
    #[arg(short = 't', long = "tier", value_enum, help = "Filter by tier")]
    pub tier: Option<TierArg>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Tier names as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TierArg {
    Platform,
    #[value(alias = "infrastructure")]
    Infra,
    Enterprise,
}

impl From<TierArg> for Tier {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::Platform => Tier::Platform,
            TierArg::Infra => Tier::Infrastructure,
            TierArg::Enterprise => Tier::Enterprise,
        }
    }
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Grouped by tier.
    Table,
    /// One name per line.
    List,
    /// JSON object keyed by tier.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `laravelboot completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_new_with_positional_preset() {
        let cli = Cli::parse_from(["laravelboot", "new", "shop", "saas"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.project, "shop");
        assert_eq!(args.preset(), Some("saas"));
    }

    #[test]
    fn preset_flags_win_over_positional() {
        let cli = Cli::parse_from(["laravelboot", "new", "shop", "saas", "--enterprise"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.preset(), Some("enterprise"));
    }

    #[test]
    fn dry_run_is_accepted_anywhere() {
        let before = Cli::parse_from(["laravelboot", "--dry-run", "add", "docker"]);
        let after = Cli::parse_from(["laravelboot", "add", "docker", "--dry-run"]);
        assert!(before.global.dry_run);
        assert!(after.global.dry_run);
    }

    #[test]
    fn tier_alias() {
        let cli = Cli::parse_from(["laravelboot", "list", "--tier", "infrastructure"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List command");
        };
        assert_eq!(args.tier.map(Tier::from), Some(Tier::Infrastructure));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["laravelboot", "--quiet", "--verbose", "version"]);
        assert!(result.is_err());
    }

    #[test]
    fn all_and_enterprise_conflict() {
        let result = Cli::try_parse_from(["laravelboot", "new", "x", "--all", "--enterprise"]);
        assert!(result.is_err());
    }
}

//! Tool settings.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. It is
//! distinct from the per-project `.laravelboot.yaml`, which the core owns.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `LARAVELBOOT_*` environment variables, `__` between section and key
//!    (e.g. `LARAVELBOOT_UPDATE__CHECK=false`)
//! 3. The `--config` file, or `config.toml` in the platform config directory
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "LARAVELBOOT";

/// Tool settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub update: UpdateConfig,
    pub project: ProjectConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Look for a newer release in the background on `new` and `add`.
    pub check: bool,
    pub releases_url: String,
    pub install_script_url: String,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            check: true,
            releases_url: "https://api.github.com/repos/codewithme224/laravelboot/releases/latest"
                .into(),
            install_script_url:
                "https://raw.githubusercontent.com/codewithme224/laravelboot/main/install.sh"
                    .into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// File name of the project configuration.
    pub config_file: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            config_file: laravelboot_adapters::CONFIG_FILE.into(),
        }
    }
}

impl AppConfig {
    /// Load settings: defaults, then the settings file, then the environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path().as_path()).required(false),
        };

        Config::builder()
            .add_source(Config::try_from(&Self::default()).context("encoding default settings")?)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("reading settings")?
            .try_deserialize()
            .context("invalid settings")
    }

    /// Path to the default settings file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.laravelboot.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "laravelboot", "laravelboot")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".laravelboot.toml"))
    }

    /// Directory for small caches such as the last update check.
    pub fn cache_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "laravelboot", "laravelboot")
            .map(|d| d.cache_dir().to_path_buf())
    }

    /// Where the project configuration lives for `dir`.
    pub fn project_file(&self, dir: &Path) -> PathBuf {
        dir.join(&self.project.config_file)
    }
}

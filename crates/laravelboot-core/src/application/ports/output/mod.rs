//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the orchestration needs from the outside world.
//! The `laravelboot-adapters` crate provides implementations; the CLI's
//! output manager implements [`Reporter`].

use std::io;
use std::path::{Path, PathBuf};

use crate::application::ApplicationError;
use crate::domain::{CommandSpec, Configuration};

/// Port for filesystem operations.
///
/// Implemented by:
/// - `laravelboot_adapters::filesystem::LocalFilesystem` (production)
/// - `laravelboot_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// What a finished external process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// stdout and stderr, combined.
    pub output: String,
}

impl CommandOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            output: output.into(),
        }
    }

    pub fn failed(code: i32, output: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            output: output.into(),
        }
    }
}

/// Port for external process execution.
///
/// Implemented by:
/// - `laravelboot_adapters::process::SystemCommandRunner` (production)
/// - `laravelboot_adapters::process::ScriptedRunner` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Whether `program` can be found on PATH. Never runs it.
    fn is_available(&self, program: &str) -> bool;

    /// Run a command to completion in `cwd`, blocking, no timeout.
    ///
    /// `Err` means the process could not be started; a process that ran
    /// and failed is `Ok` with `success == false`.
    fn run(&self, command: &CommandSpec, cwd: &Path) -> io::Result<CommandOutput>;
}

/// Port for user-facing progress output.
#[cfg_attr(test, mockall::automock)]
pub trait Reporter: Send + Sync {
    /// A dry-run description of something that would happen.
    fn planned(&self, description: &str);

    /// A stage or feature is starting.
    fn progress(&self, message: &str);

    /// Something went wrong but the run continues.
    fn warning(&self, message: &str);

    /// A run finished.
    fn success(&self, message: &str);
}

/// Port for the persisted project configuration.
///
/// Implemented by `laravelboot_adapters::config_store::YamlConfigStore`.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigStore: Send + Sync {
    /// Location of the configuration file for a directory.
    fn path_in(&self, dir: &Path) -> PathBuf;

    /// Load the configuration kept in `dir`. `Ok(None)` when there is none;
    /// a file that exists but cannot be parsed is an error.
    fn load(&self, dir: &Path) -> Result<Option<Configuration>, ApplicationError>;

    /// Persist `config` in `dir`, returning the written path.
    fn save(&self, dir: &Path, config: &Configuration) -> Result<PathBuf, ApplicationError>;
}

/// Every adapter a run needs, bundled for injection.
pub struct Ports {
    pub filesystem: Box<dyn Filesystem>,
    pub runner: Box<dyn CommandRunner>,
    pub reporter: Box<dyn Reporter>,
    pub config_store: Box<dyn ConfigStore>,
}

//! Infrastructure adapters for LaravelBoot.
//!
//! This crate implements the ports defined in
//! `laravelboot-core::application::ports` and ships the built-in feature
//! catalog. It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod config_store;
pub mod filesystem;
pub mod plugins;
pub mod process;
pub mod reporter;

// Re-export commonly used adapters
pub use config_store::{CONFIG_FILE, YamlConfigStore};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use plugins::LogPlugin;
pub use process::{ScriptedRunner, SystemCommandRunner};
pub use reporter::MemoryReporter;

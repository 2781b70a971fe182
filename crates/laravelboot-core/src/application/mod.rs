//! Application layer for LaravelBoot.
//!
//! This layer contains:
//! - **Steps**: the `Step` trait and the data-driven `SetupStep`
//! - **Registry**: per-tier feature tables and the catalog bundling them
//! - **Services**: use case orchestration (StackComposer, TierManager, ...)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: step and orchestration error types
//!
//! Everything here reaches the outside world through ports only.

pub mod context;
pub mod error;
pub mod ports;
pub mod registry;
pub mod services;
pub mod step;

pub use context::ExecutionContext;
pub use error::{ApplicationError, StepError, StepFailure};
pub use ports::{CommandOutput, CommandRunner, ConfigStore, Filesystem, Ports, Reporter};
pub use registry::{FeatureCatalog, FeatureRegistry};
pub use services::{
    AuthManager, CreateReport, CreateRequest, DocsGenerator, FailurePolicy, FeatureFailure,
    Plugin, PluginManager, PluginResult, ProjectInstaller, Stage, StackComposer, TierManager,
    TierReport,
};
pub use step::{SetupStep, Step, StepRef};

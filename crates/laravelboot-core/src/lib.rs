//! LaravelBoot Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the LaravelBoot
//! project scaffolder: the feature orchestration engine.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         laravelboot-cli (CLI)           │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │  StackComposer → AuthManager,           │
//! │  TierManager ×3 → FeatureRegistry       │
//! │  → Step (SetupStep)                     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │  Filesystem, CommandRunner, Reporter,   │
//! │  ConfigStore                            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    laravelboot-adapters (Infrastructure)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use laravelboot_core::prelude::*;
//!
//! # fn run(catalog: FeatureCatalog, ports: Ports) -> BootResult<()> {
//! let composer = StackComposer::new(catalog, ports, PluginManager::new());
//! let report = composer.create(&CreateRequest {
//!     name: "shop".into(),
//!     preset: Some("saas".into()),
//!     workdir: ".".into(),
//!     dry_run: true,
//! })?;
//! assert!(report.is_clean());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CreateReport, CreateRequest, ExecutionContext, FailurePolicy, FeatureCatalog,
        FeatureRegistry, PluginManager, SetupStep, StackComposer, Step, StepRef, TierManager,
        ports::{CommandOutput, CommandRunner, ConfigStore, Filesystem, Ports, Reporter},
    };
    pub use crate::domain::{
        Action, AuthKind, CommandSpec, Configuration, Database, Preset, TextPatch, Tier,
    };
    pub use crate::error::{BootError, BootResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish high-level
//! use cases like "create a project" or "add a feature".

pub mod auth_manager;
pub mod docs;
pub mod installer;
pub mod plugins;
pub mod stack_composer;
pub mod tier_manager;

pub use auth_manager::AuthManager;
pub use docs::{DOCS_FILE, DocsGenerator};
pub use installer::{ProjectInstaller, REQUIRED_PROGRAMS};
pub use plugins::{Plugin, PluginManager, PluginResult};
pub use stack_composer::{CreateReport, CreateRequest, StackComposer};
pub use tier_manager::{FailurePolicy, FeatureFailure, Stage, TierManager, TierReport};

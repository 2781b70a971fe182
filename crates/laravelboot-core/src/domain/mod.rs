//! Core domain layer for LaravelBoot.
//!
//! Pure data and rules: tiers, project configuration, presets, the actions a
//! step is made of, and idempotent text patches. Nothing in here touches the
//! filesystem or spawns processes.

pub mod action;
pub mod configuration;
pub mod error;
pub mod patch;
pub mod preset;
pub mod tier;

pub use action::{Action, CommandSpec};
pub use configuration::{ArchitectureStyle, AuthKind, Configuration, Database};
pub use error::{DomainError, ErrorCategory};
pub use patch::{PatchEdit, PatchOutcome, TextPatch};
pub use preset::{ConfigSource, Preset, resolve_configuration};
pub use tier::Tier;

//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `laravelboot-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `CommandRunner`: composer / artisan / installer processes
//!   - `Reporter`: progress and dry-run output
//!   - `ConfigStore`: the persisted project configuration
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CommandOutput, CommandRunner, ConfigStore, Filesystem, Ports, Reporter};

#[cfg(test)]
pub use output::{MockCommandRunner, MockConfigStore, MockFilesystem, MockReporter};

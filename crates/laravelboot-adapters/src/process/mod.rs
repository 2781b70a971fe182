//! External process adapters.

mod scripted;
mod system;

pub use scripted::{Invocation, ScriptedRunner};
pub use system::SystemCommandRunner;

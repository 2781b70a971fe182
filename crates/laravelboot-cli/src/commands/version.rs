//! `laravelboot version`.

use crate::error::CliResult;

/// The banner printed by `laravelboot version`.
pub fn banner() -> String {
    format!("LaravelBoot v{}", laravelboot_core::VERSION)
}

/// Printed even in quiet mode.
pub fn execute() -> CliResult<()> {
    println!("{}", banner());
    Ok(())
}

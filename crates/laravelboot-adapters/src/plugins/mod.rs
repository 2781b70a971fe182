//! Built-in plugins.

mod log;

pub use log::LogPlugin;

use laravelboot_core::application::PluginManager;

/// A plugin manager with every built-in plugin registered.
pub fn builtin() -> PluginManager {
    let mut manager = PluginManager::new();
    manager.register(Box::new(LogPlugin));
    manager
}

//! YAML-backed project configuration store.

use std::path::{Path, PathBuf};

use laravelboot_core::application::{ApplicationError, ports::ConfigStore};
use laravelboot_core::domain::Configuration;
use tracing::{debug, instrument};

/// Default file name of the persisted project configuration.
pub const CONFIG_FILE: &str = ".laravelboot.yaml";

/// Reads and writes the project configuration as YAML in a directory.
#[derive(Debug, Clone)]
pub struct YamlConfigStore {
    file_name: String,
}

impl YamlConfigStore {
    pub fn new() -> Self {
        Self::with_file_name(CONFIG_FILE)
    }

    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    fn error(path: &Path, reason: impl ToString) -> ApplicationError {
        ApplicationError::ConfigStore {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

impl Default for YamlConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for YamlConfigStore {
    fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }

    #[instrument(skip(self), fields(file = %self.file_name))]
    fn load(&self, dir: &Path) -> Result<Option<Configuration>, ApplicationError> {
        let path = self.path_in(dir);
        if !path.exists() {
            debug!("No project configuration file");
            return Ok(None);
        }
        let text = std::fs::read_to_string(&path).map_err(|e| Self::error(&path, e))?;
        let config = serde_yaml::from_str(&text).map_err(|e| Self::error(&path, e))?;
        debug!(path = %path.display(), "Loaded project configuration");
        Ok(Some(config))
    }

    fn save(&self, dir: &Path, config: &Configuration) -> Result<PathBuf, ApplicationError> {
        let path = self.path_in(dir);
        let text = serde_yaml::to_string(config).map_err(|e| Self::error(&path, e))?;
        std::fs::write(&path, text).map_err(|e| Self::error(&path, e))?;
        Ok(path)
    }
}

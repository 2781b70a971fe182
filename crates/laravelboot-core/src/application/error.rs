//! Application layer errors.
//!
//! These errors represent failures while executing steps and orchestrating
//! runs. Business-rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, Tier};
use crate::error::ErrorCategory;

/// Why a single step failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepFailure {
    /// Filesystem operation failed.
    #[error("failed to {operation} {path}: {reason}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// The external process ran and exited unsuccessfully.
    #[error("`{command}` exited with {}", exit_label(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// The external process could not be started at all.
    #[error("could not run `{command}`: {reason}")]
    LaunchFailed { command: String, reason: String },

    /// A file the step builds on does not exist.
    #[error("required file {path} does not exist")]
    MissingFile { path: PathBuf },

    /// A text patch could not be applied to an existing file.
    #[error("cannot patch {path}: {source}")]
    Patch {
        path: PathBuf,
        #[source]
        source: DomainError,
    },

    /// Anything else (custom steps).
    #[error("{0}")]
    Other(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".into(),
    }
}

/// A step failure attributed to the step that raised it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("step '{step}' failed: {failure}")]
pub struct StepError {
    pub step: String,
    pub failure: StepFailure,
}

impl StepError {
    pub fn new(step: impl Into<String>, failure: StepFailure) -> Self {
        Self {
            step: step.into(),
            failure,
        }
    }

    /// Captured output of a failed command, if any.
    pub fn output(&self) -> Option<&str> {
        match &self.failure {
            StepFailure::CommandFailed { output, .. } if !output.trim().is_empty() => {
                Some(output.as_str())
            }
            _ => None,
        }
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A program the run depends on is not on PATH.
    #[error("{program} is not installed or not on PATH")]
    MissingPrerequisite { program: String },

    /// A step failed.
    #[error(transparent)]
    Step(#[from] StepError),

    /// A post-processing plugin failed.
    #[error("plugin '{plugin}' failed: {reason}")]
    Plugin { plugin: String, reason: String },

    /// The persisted project configuration could not be read or written.
    #[error("project configuration {path}: {reason}")]
    ConfigStore { path: PathBuf, reason: String },

    /// Registering a feature violated a registry rule.
    #[error("cannot register {tier} feature '{name}': {reason}")]
    Registration {
        tier: Tier,
        name: String,
        reason: &'static str,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingPrerequisite { program } => match program.as_str() {
                "php" => vec![
                    "Install PHP 8.2 or newer: https://www.php.net/downloads".into(),
                    "Make sure `php -v` works in this shell".into(),
                ],
                "composer" => vec![
                    "Install Composer: https://getcomposer.org/download/".into(),
                    "Make sure `composer --version` works in this shell".into(),
                ],
                other => vec![format!("Install {other} and make sure it is on PATH")],
            },
            Self::Step(e) => {
                let mut out = vec![format!("Step '{}' did not complete", e.step)];
                match &e.failure {
                    StepFailure::CommandFailed { .. } => {
                        out.push("Check the command output above".into());
                        out.push("Fix the cause, then re-run the feature with: laravelboot add <feature>".into());
                    }
                    StepFailure::MissingFile { .. } => {
                        out.push("Run the command from the root of a Laravel project".into());
                    }
                    StepFailure::Io { .. } => {
                        out.push("Check that you have write permissions".into());
                    }
                    StepFailure::Patch { source, .. } => out.extend(source.suggestions()),
                    StepFailure::LaunchFailed { .. } | StepFailure::Other(_) => {}
                }
                out
            }
            Self::Plugin { plugin, .. } => vec![format!("Check the configuration of plugin '{plugin}'")],
            Self::ConfigStore { path, .. } => vec![
                format!("Fix or remove {}", path.display()),
                "Regenerate it with: laravelboot init".into(),
            ],
            Self::Registration { .. } => vec!["This is a bug in the feature catalog".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingPrerequisite { .. } => ErrorCategory::Prerequisite,
            Self::Step(_) | Self::Plugin { .. } => ErrorCategory::Execution,
            Self::ConfigStore { .. } => ErrorCategory::Configuration,
            Self::Registration { .. } => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_names_step_and_exit_code() {
        let err = StepError::new(
            "roles-package",
            StepFailure::CommandFailed {
                command: "composer require spatie/laravel-permission".into(),
                code: Some(2),
                output: "Your requirements could not be resolved".into(),
            },
        );
        let text = err.to_string();
        assert!(text.contains("roles-package"));
        assert!(text.contains("status 2"));
        assert_eq!(err.output(), Some("Your requirements could not be resolved"));
    }

    #[test]
    fn blank_output_is_not_reported() {
        let err = StepError::new(
            "x",
            StepFailure::CommandFailed {
                command: "php".into(),
                code: None,
                output: "  \n".into(),
            },
        );
        assert_eq!(err.output(), None);
        assert!(err.to_string().contains("signal"));
    }

    #[test]
    fn missing_prerequisite_is_its_own_category() {
        let err = ApplicationError::MissingPrerequisite {
            program: "composer".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Prerequisite);
        assert!(err.suggestions()[0].contains("getcomposer.org"));
    }
}

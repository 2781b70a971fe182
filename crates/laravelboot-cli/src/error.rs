//! Error handling for the LaravelBoot CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use laravelboot_core::error::BootError;

// Re-export so callers only need `use crate::error::*`.
pub use laravelboot_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Lines of captured command output shown under a failed step.
const OUTPUT_TAIL: usize = 20;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Project name validation failed.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// A settings or project configuration file could not be read or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `laravelboot-core`.
    #[error(transparent)]
    Core(#[from] BootError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,

    /// Feature not compiled in (e.g. interactive prompts).
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },

    /// Self-update could not run or did not succeed.
    #[error("Update failed: {reason}")]
    UpdateFailed { reason: String },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{name}' is invalid: {reason}"),
                "Use letters, numbers, hyphens and underscores".into(),
                "Examples: shop, billing-api, crm_backend".into(),
            ],

            Self::ConfigError { .. } => vec![
                "Check the file for syntax errors".into(),
                "Check LARAVELBOOT_* environment variables for invalid values".into(),
                "Regenerate the project configuration with: laravelboot init --force".into(),
            ],

            Self::Core(core) => core.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => vec!["No changes were made".into()],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{feature}' feature is not available in this build"),
                format!("Install with the feature enabled: cargo install laravelboot-cli --features {feature}"),
                "Or pass --defaults to skip the prompts".into(),
            ],

            Self::UpdateFailed { .. } => vec![
                "Download the latest release manually: https://github.com/codewithme224/laravelboot/releases".into(),
            ],
        }
    }

    /// Get the error category for styling and logging.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::Cancelled => ErrorCategory::UserError,
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::Configuration
            }
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Prerequisite => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Execution | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } | Self::UpdateFailed { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS. Every runtime error is `1`; argument
    /// errors exit with `2` before a `CliError` exists.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Captured output of the failed command, if a step failed that way.
    fn command_output(&self) -> Option<&str> {
        match self {
            Self::Core(core) => core.as_step_error().and_then(|e| e.output()),
            _ => None,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {} {}\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold(),
            self.to_string().red()
        ));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "  {} {}\n",
                    "\u{2192}".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        if let Some(captured) = self.command_output() {
            output.push_str(&format!("\n{}\n", "Output:".bold()));
            for line in tail(captured, verbose) {
                output.push_str(&format!("  {}\n", line.dimmed()));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\n\u{2717} Error: {self}\n");

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        if let Some(captured) = self.command_output() {
            out.push_str("\nOutput:\n");
            for line in tail(captured, verbose) {
                out.push_str(&format!("  {line}\n"));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// The last lines of captured output; everything when verbose.
fn tail(output: &str, verbose: bool) -> impl Iterator<Item = &str> {
    let lines: Vec<&str> = output.lines().collect();
    let skip = if verbose {
        0
    } else {
        lines.len().saturating_sub(OUTPUT_TAIL)
    };
    lines.into_iter().skip(skip)
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, missing tools).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use laravelboot_core::application::{ApplicationError, StepError, StepFailure};
    use laravelboot_core::domain::DomainError;

    use super::*;

    fn step_failure(output: &str) -> CliError {
        CliError::Core(BootError::from(StepError::new(
            "media",
            StepFailure::CommandFailed {
                command: "composer require spatie/laravel-medialibrary".into(),
                code: Some(2),
                output: output.into(),
            },
        )))
    }

    #[test]
    fn every_error_exits_with_one() {
        let errors = [
            CliError::Cancelled,
            CliError::InvalidProjectName {
                name: ".x".into(),
                reason: "starts with '.'".into(),
            },
            CliError::Core(BootError::from(DomainError::UnknownAnyFeature {
                name: "bogus".into(),
            })),
            step_failure("boom"),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1, "{err}");
        }
    }

    #[test]
    fn unknown_feature_is_not_found() {
        let err = CliError::Core(BootError::from(DomainError::UnknownAnyFeature {
            name: "bogus".into(),
        }));
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn missing_tool_is_a_user_error_with_install_hint() {
        let err = CliError::Core(BootError::from(ApplicationError::MissingPrerequisite {
            program: "composer".into(),
        }));
        assert_eq!(err.category(), ErrorCategory::UserError);
        assert!(err.suggestions().iter().any(|s| s.contains("getcomposer.org")));
    }

    #[test]
    fn plain_format_has_marker_and_suggestions() {
        let s = CliError::InvalidProjectName {
            name: "a/b".into(),
            reason: "name cannot contain path separators".into(),
        }
        .format_plain(false);
        assert!(s.contains("\u{2717} Error: Invalid project name 'a/b'"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn plain_format_shows_command_output_tail() {
        let output: String = (1..=30).map(|i| format!("line {i}\n")).collect();
        let s = step_failure(&output).format_plain(false);
        assert!(s.contains("Output:"));
        assert!(s.contains("line 30"));
        assert!(!s.contains("line 5\n"));

        let verbose = step_failure(&output).format_plain(true);
        assert!(verbose.contains("line 5\n"));
        assert!(!verbose.contains("--verbose"));
    }

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }
}

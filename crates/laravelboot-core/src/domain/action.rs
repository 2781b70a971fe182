//! Actions: the smallest units a setup step is made of.
//!
//! Actions are plain data. Executing them is the application layer's job;
//! the domain only knows how to describe them, which is what a dry run shows.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::patch::TextPatch;

/// An external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// `composer require <packages...>`
    pub fn composer_require<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("composer").arg("require").args(packages)
    }

    /// `php artisan <args...>`
    pub fn artisan<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("php").arg("artisan").args(args)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// One unit of work inside a step. Paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateDir {
        path: PathBuf,
    },
    /// Create parent directories, then write (overwrite) the file.
    WriteFile {
        path: PathBuf,
        content: Cow<'static, str>,
    },
    /// Read an existing file, apply an idempotent patch, write it back.
    Patch {
        path: PathBuf,
        patch: TextPatch,
    },
    /// Fail unless the file exists.
    RequireFile {
        path: PathBuf,
    },
    /// Run `command` only when `path` is missing.
    EnsureFile {
        path: PathBuf,
        command: CommandSpec,
    },
    /// Invoke one external process with the project root as working
    /// directory. A best-effort command that fails only produces a warning.
    Run {
        command: CommandSpec,
        best_effort: bool,
    },
}

impl Action {
    /// Human-readable description of what executing this action would do.
    pub fn describe(&self, root: &Path) -> String {
        match self {
            Self::CreateDir { path } => {
                format!("Would create directory: {}", root.join(path).display())
            }
            Self::WriteFile { path, .. } => {
                format!("Would create file: {}", root.join(path).display())
            }
            Self::Patch { path, patch } => format!(
                "Would patch {} (skipped if it already contains `{}`)",
                root.join(path).display(),
                patch.marker()
            ),
            Self::RequireFile { path } => {
                format!("Would check that {} exists", root.join(path).display())
            }
            Self::EnsureFile { path, command } => format!(
                "Would run `{command}` if {} is missing",
                root.join(path).display()
            ),
            Self::Run {
                command,
                best_effort,
            } => {
                if *best_effort {
                    format!("Would run (best effort): {command}")
                } else {
                    format!("Would run: {command}")
                }
            }
        }
    }
}

//! Process runner backed by `std::process`.

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use laravelboot_core::application::ports::{CommandOutput, CommandRunner};
use laravelboot_core::domain::CommandSpec;
use tracing::{debug, trace};

/// Runs commands for real, blocking until they exit.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    /// Overrides `PATH` for lookups; mostly for tests.
    search_path: Option<OsString>,
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look programs up in `path` instead of the process `PATH`.
    pub fn with_search_path(path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(path.into()),
        }
    }

    fn find(&self, program: &str) -> Option<PathBuf> {
        let path = self.search_path.clone().or_else(|| env::var_os("PATH"))?;
        env::split_paths(&path)
            .flat_map(|dir| candidates(&dir, program))
            .find(|candidate| is_executable(candidate))
    }
}

#[cfg(windows)]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    let exts = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".into());
    std::iter::once(dir.join(program))
        .chain(exts.split(';').filter(|e| !e.is_empty()).map(|ext| dir.join(format!("{program}{ext}"))))
        .collect()
}

#[cfg(not(windows))]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

impl CommandRunner for SystemCommandRunner {
    fn is_available(&self, program: &str) -> bool {
        let found = self.find(program);
        trace!(program, found = ?found, "PATH lookup");
        found.is_some()
    }

    fn run(&self, command: &CommandSpec, cwd: &Path) -> io::Result<CommandOutput> {
        debug!(%command, cwd = %cwd.display(), "Spawning");
        let output = Command::new(command.program())
            .args(command.arguments())
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            output: combined,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn lookup_uses_search_path_only() {
        let runner = SystemCommandRunner::with_search_path("/nonexistent-dir");
        assert!(!runner.is_available("sh"));
        let runner = SystemCommandRunner::with_search_path("/bin:/usr/bin");
        assert!(runner.is_available("sh"));
    }

    #[test]
    fn captures_output_and_status() {
        let runner = SystemCommandRunner::new();
        let ok = runner
            .run(&CommandSpec::new("sh").args(["-c", "echo out; echo err >&2"]), Path::new("/"))
            .unwrap();
        assert!(ok.success);
        assert!(ok.output.contains("out"));
        assert!(ok.output.contains("err"));

        let failed = runner
            .run(&CommandSpec::new("sh").args(["-c", "exit 3"]), Path::new("/"))
            .unwrap();
        assert!(!failed.success);
        assert_eq!(failed.code, Some(3));
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let runner = SystemCommandRunner::new();
        let result = runner.run(
            &CommandSpec::new("laravelboot-definitely-missing"),
            Path::new("/"),
        );
        assert!(result.is_err());
    }
}

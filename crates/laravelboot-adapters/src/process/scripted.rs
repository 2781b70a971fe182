//! Scripted process runner for tests and previews.
//!
//! Records every invocation and answers from a table instead of spawning
//! anything.

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use laravelboot_core::application::ports::{CommandOutput, CommandRunner};
use laravelboot_core::domain::CommandSpec;

/// One recorded call to [`CommandRunner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub cwd: PathBuf,
}

#[derive(Debug, Default)]
struct Script {
    available: BTreeSet<String>,
    /// Keyed by command prefix; the longest matching prefix wins.
    responses: HashMap<String, CommandOutput>,
    unlaunchable: BTreeSet<String>,
    calls: Vec<Invocation>,
}

/// A fake [`CommandRunner`]. Unscripted commands succeed with no output.
/// Clones share the same script and call log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    script: Arc<Mutex<Script>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Programs reported as present on PATH.
    pub fn with_programs<I, S>(self, programs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock()
            .available
            .extend(programs.into_iter().map(Into::into));
        self
    }

    /// Make every command starting with `prefix` exit with `code`.
    pub fn fail(self, prefix: impl Into<String>, code: i32, output: impl Into<String>) -> Self {
        self.lock()
            .responses
            .insert(prefix.into(), CommandOutput::failed(code, output));
        self
    }

    /// Make every command starting with `prefix` fail to launch.
    pub fn unlaunchable(self, prefix: impl Into<String>) -> Self {
        self.lock().unlaunchable.insert(prefix.into());
        self
    }

    /// Every `run` call so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.lock().calls.clone()
    }

    /// Rendered command lines of every `run` call so far.
    pub fn commands(&self) -> Vec<String> {
        self.lock().calls.iter().map(|c| c.command.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CommandRunner for ScriptedRunner {
    fn is_available(&self, program: &str) -> bool {
        self.lock().available.contains(program)
    }

    fn run(&self, command: &CommandSpec, cwd: &Path) -> io::Result<CommandOutput> {
        let line = command.to_string();
        let mut script = self.lock();
        script.calls.push(Invocation {
            command: line.clone(),
            cwd: cwd.to_path_buf(),
        });

        if script.unlaunchable.iter().any(|p| line.starts_with(p.as_str())) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "program not found"));
        }
        let response = script
            .responses
            .iter()
            .filter(|(prefix, _)| line.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, out)| out.clone());
        Ok(response.unwrap_or_else(|| CommandOutput::ok("")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_prefix_wins() {
        let runner = ScriptedRunner::new()
            .fail("composer", 1, "generic")
            .fail("composer require spatie", 2, "specific");
        let out = runner
            .run(
                &CommandSpec::composer_require(["spatie/laravel-permission"]),
                Path::new("/p"),
            )
            .unwrap();
        assert_eq!(out.code, Some(2));
        assert_eq!(runner.commands().len(), 1);
    }

    #[test]
    fn unscripted_commands_succeed() {
        let runner = ScriptedRunner::new().with_programs(["php"]);
        assert!(runner.is_available("php"));
        assert!(!runner.is_available("composer"));
        let out = runner
            .run(&CommandSpec::artisan(["migrate"]), Path::new("/p"))
            .unwrap();
        assert!(out.success);
        assert_eq!(runner.calls()[0].cwd, PathBuf::from("/p"));
    }
}

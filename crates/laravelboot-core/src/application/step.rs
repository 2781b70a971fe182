//! Steps: named units of work a feature is made of.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::context::ExecutionContext;
use crate::application::error::{StepError, StepFailure};
use crate::domain::{Action, CommandSpec, PatchOutcome};

/// One named unit of work.
///
/// With a dry-run context a step must not touch the filesystem or spawn
/// processes; it reports what it would do and succeeds.
pub trait Step: Send + Sync {
    fn name(&self) -> &str;

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<(), StepError>;
}

/// Shared handle to a step. The same step can appear in a feature and in
/// its tier aggregate.
pub type StepRef = Arc<dyn Step>;

impl fmt::Debug for dyn Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Step").field(&self.name()).finish()
    }
}

/// A step described entirely as data: a name and an ordered list of
/// actions, executed fail-fast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupStep {
    name: String,
    actions: Vec<Action>,
}

impl SetupStep {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
        }
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn into_ref(self) -> StepRef {
        Arc::new(self)
    }

    fn fail(&self, failure: StepFailure) -> StepError {
        StepError::new(self.name.as_str(), failure)
    }

    fn io(&self, operation: &'static str, path: &Path, err: std::io::Error) -> StepError {
        self.fail(StepFailure::Io {
            operation,
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    fn apply(&self, action: &Action, ctx: &ExecutionContext<'_>) -> Result<(), StepError> {
        let fs = ctx.filesystem();
        match action {
            Action::CreateDir { path } => {
                let full = ctx.path(path);
                fs.create_dir_all(&full)
                    .map_err(|e| self.io("create directory", &full, e))
            }
            Action::WriteFile { path, content } => {
                let full = ctx.path(path);
                if let Some(parent) = full.parent() {
                    fs.create_dir_all(parent)
                        .map_err(|e| self.io("create directory", parent, e))?;
                }
                fs.write_file(&full, content)
                    .map_err(|e| self.io("write", &full, e))
            }
            Action::Patch { path, patch } => {
                let full = ctx.path(path);
                let source = fs
                    .read_to_string(&full)
                    .map_err(|e| self.io("read", &full, e))?;
                match patch.apply(&source) {
                    Ok(PatchOutcome::Applied(updated)) => fs
                        .write_file(&full, &updated)
                        .map_err(|e| self.io("write", &full, e)),
                    Ok(PatchOutcome::AlreadyApplied) => {
                        debug!(path = %full.display(), marker = patch.marker(), "Patch already applied");
                        Ok(())
                    }
                    Err(source) => Err(self.fail(StepFailure::Patch { path: full, source })),
                }
            }
            Action::RequireFile { path } => {
                let full = ctx.path(path);
                if fs.exists(&full) {
                    Ok(())
                } else {
                    Err(self.fail(StepFailure::MissingFile { path: full }))
                }
            }
            Action::EnsureFile { path, command } => {
                if fs.exists(&ctx.path(path)) {
                    return Ok(());
                }
                self.run(command, false, ctx)
            }
            Action::Run {
                command,
                best_effort,
            } => self.run(command, *best_effort, ctx),
        }
    }

    fn run(
        &self,
        command: &CommandSpec,
        best_effort: bool,
        ctx: &ExecutionContext<'_>,
    ) -> Result<(), StepError> {
        debug!(command = %command, cwd = %ctx.root().display(), "Running command");
        let failure = match ctx.runner().run(command, ctx.root()) {
            Ok(out) if out.success => return Ok(()),
            Ok(out) => StepFailure::CommandFailed {
                command: command.to_string(),
                code: out.code,
                output: out.output,
            },
            Err(e) => StepFailure::LaunchFailed {
                command: command.to_string(),
                reason: e.to_string(),
            },
        };

        if best_effort {
            warn!(step = %self.name, error = %failure, "Optional command failed");
            ctx.reporter()
                .warning(&format!("{failure} (optional, continuing)"));
            return Ok(());
        }
        Err(self.fail(failure))
    }
}

impl Step for SetupStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<(), StepError> {
        if ctx.is_dry_run() {
            for action in &self.actions {
                ctx.reporter().planned(&action.describe(ctx.root()));
            }
            return Ok(());
        }

        debug!(step = %self.name, actions = self.actions.len(), "Executing step");
        for action in &self.actions {
            self.apply(action, ctx)?;
        }
        Ok(())
    }
}

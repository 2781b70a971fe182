//! Per-run execution context.

use std::path::{Path, PathBuf};

use crate::application::ports::{CommandRunner, Filesystem, Ports, Reporter};

/// Everything a step needs to run: the ports, the project root and the
/// dry-run flag. Built once per run; the flag never changes afterwards.
#[derive(Clone)]
pub struct ExecutionContext<'a> {
    filesystem: &'a dyn Filesystem,
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
    root: PathBuf,
    dry_run: bool,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        filesystem: &'a dyn Filesystem,
        runner: &'a dyn CommandRunner,
        reporter: &'a dyn Reporter,
        root: impl Into<PathBuf>,
        dry_run: bool,
    ) -> Self {
        Self {
            filesystem,
            runner,
            reporter,
            root: root.into(),
            dry_run,
        }
    }

    /// Borrow every port from a bundle.
    pub fn from_ports(ports: &'a Ports, root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self::new(
            ports.filesystem.as_ref(),
            ports.runner.as_ref(),
            ports.reporter.as_ref(),
            root,
            dry_run,
        )
    }

    /// Same ports and dry-run flag, different root.
    pub fn with_root(&self, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..self.clone()
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a project-relative path.
    pub fn path(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn filesystem(&self) -> &'a dyn Filesystem {
        self.filesystem
    }

    pub fn runner(&self) -> &'a dyn CommandRunner {
        self.runner
    }

    pub fn reporter(&self) -> &'a dyn Reporter {
        self.reporter
    }
}

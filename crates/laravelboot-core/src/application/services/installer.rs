//! Laravel project creation.

use tracing::{debug, info};

use crate::application::ApplicationError;
use crate::application::ports::CommandRunner;
use crate::application::step::SetupStep;
use crate::domain::{Action, CommandSpec};

/// Programs a `new` run cannot do without.
pub const REQUIRED_PROGRAMS: [&str; 2] = ["php", "composer"];

/// Checks prerequisites and builds the project-creation step.
pub struct ProjectInstaller<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> ProjectInstaller<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Fail with the first required program missing from PATH. Only looks
    /// programs up; nothing is executed.
    pub fn check_prerequisites(&self) -> Result<(), ApplicationError> {
        for program in REQUIRED_PROGRAMS {
            if !self.runner.is_available(program) {
                return Err(ApplicationError::MissingPrerequisite {
                    program: program.to_string(),
                });
            }
            debug!(program, "Prerequisite found");
        }
        Ok(())
    }

    /// The step that creates `<cwd>/<name>`. Prefers the Laravel installer
    /// and falls back to `composer create-project`.
    pub fn creation_step(&self, name: &str) -> SetupStep {
        let command = if self.runner.is_available("laravel") {
            CommandSpec::new("laravel")
                .args(["new", name, "--no-interaction"])
        } else {
            info!("Laravel installer not found, using composer create-project");
            CommandSpec::new("composer").args(["create-project", "laravel/laravel", name])
        };
        SetupStep::new("create-project").action(Action::Run {
            command,
            best_effort: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockCommandRunner;

    fn runner_with(available: &'static [&'static str]) -> MockCommandRunner {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_is_available()
            .returning(move |p| available.contains(&p));
        runner
    }

    #[test]
    fn missing_composer_is_reported() {
        let runner = runner_with(&["php"]);
        let err = ProjectInstaller::new(&runner)
            .check_prerequisites()
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::MissingPrerequisite { ref program } if program == "composer"
        ));
    }

    #[test]
    fn prefers_laravel_installer() {
        let runner = runner_with(&["php", "composer", "laravel"]);
        let step = ProjectInstaller::new(&runner).creation_step("demo");
        let Action::Run { command, .. } = &step.actions()[0] else {
            panic!("expected a command");
        };
        assert_eq!(command.to_string(), "laravel new demo --no-interaction");
    }

    #[test]
    fn falls_back_to_composer() {
        let runner = runner_with(&["php", "composer"]);
        let step = ProjectInstaller::new(&runner).creation_step("demo");
        let Action::Run { command, .. } = &step.actions()[0] else {
            panic!("expected a command");
        };
        assert_eq!(
            command.to_string(),
            "composer create-project laravel/laravel demo"
        );
    }
}

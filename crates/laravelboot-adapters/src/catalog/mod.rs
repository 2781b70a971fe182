//! Built-in feature catalog.
//!
//! Every feature is a list of [`SetupStep`]s built from plain actions. The
//! payloads the steps write live under `stubs/` and are compiled in.

mod auth;
mod enterprise;
mod infra;
mod platform;
mod scaffold;

use std::borrow::Cow;
use std::path::PathBuf;

use laravelboot_core::application::{
    ApplicationError, FeatureCatalog, FeatureRegistry, SetupStep, StepRef,
};
use laravelboot_core::domain::{Action, AuthKind, CommandSpec, TextPatch, Tier};

/// The catalog shipped with the binary.
pub fn builtin() -> Result<FeatureCatalog, ApplicationError> {
    let mut catalog = FeatureCatalog::new(
        scaffold::steps(),
        registry(Tier::Platform, platform::features())?,
        registry(Tier::Infrastructure, infra::features())?,
        registry(Tier::Enterprise, enterprise::features())?,
    )?;
    for kind in AuthKind::ALL {
        catalog = catalog.with_auth(kind, auth::steps(kind));
    }
    Ok(catalog)
}

fn registry(
    tier: Tier,
    features: Vec<(&'static str, Vec<StepRef>)>,
) -> Result<FeatureRegistry, ApplicationError> {
    features
        .into_iter()
        .try_fold(FeatureRegistry::new(tier), |registry, (name, steps)| {
            registry.register(name, steps)
        })
}

// ── action shorthands ────────────────────────────────────────────────────────

pub(crate) const USER_MODEL: &str = "app/Models/User.php";
pub(crate) const API_ROUTES: &str = "routes/api.php";
pub(crate) const AUTHENTICATABLE_IMPORT: &str =
    "use Illuminate\\Foundation\\Auth\\User as Authenticatable;";

fn mkdir(path: &str) -> Action {
    Action::CreateDir {
        path: PathBuf::from(path),
    }
}

fn write(path: &str, content: &'static str) -> Action {
    Action::WriteFile {
        path: PathBuf::from(path),
        content: Cow::Borrowed(content),
    }
}

fn patch(path: &str, patch: TextPatch) -> Action {
    Action::Patch {
        path: PathBuf::from(path),
        patch,
    }
}

fn run(command: CommandSpec) -> Action {
    Action::Run {
        command,
        best_effort: false,
    }
}

/// A command whose failure is only worth a warning.
fn try_run(command: CommandSpec) -> Action {
    Action::Run {
        command,
        best_effort: true,
    }
}

fn require(packages: &[&str]) -> Action {
    run(CommandSpec::composer_require(packages.iter().copied()))
}

fn artisan(args: &[&str]) -> Action {
    run(CommandSpec::artisan(args.iter().copied()))
}

fn step(name: &str, actions: impl IntoIterator<Item = Action>) -> StepRef {
    actions
        .into_iter()
        .fold(SetupStep::new(name), SetupStep::action)
        .into_ref()
}

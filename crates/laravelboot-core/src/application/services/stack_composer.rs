//! Stack Composer - main application orchestrator.
//!
//! This service coordinates the `new` workflow:
//! 1. Resolve the configuration (file, preset, defaults)
//! 2. Check prerequisites and create the Laravel project
//! 3. Run the mandatory scaffold steps
//! 4. Run auth and every enabled feature, tier by tier
//! 5. Run plugins and write the API docs
//!
//! Steps 2, 3 and 5 are fatal on failure. A failing feature in step 4 is
//! reported and skipped.
//!
//! It also backs `add` and `init`.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::context::ExecutionContext;
use crate::application::ports::Ports;
use crate::application::registry::FeatureCatalog;
use crate::application::services::auth_manager::AuthManager;
use crate::application::services::docs::DocsGenerator;
use crate::application::services::installer::ProjectInstaller;
use crate::application::services::plugins::PluginManager;
use crate::application::services::tier_manager::{
    FailurePolicy, FeatureFailure, Stage, TierManager,
};
use crate::application::step::Step;
use crate::domain::{
    AuthKind, ConfigSource, Configuration, DomainError, Tier, resolve_configuration,
};
use crate::error::BootResult;

/// Input of a `new` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub name: String,
    pub preset: Option<String>,
    /// Directory the project is created in; also where the persisted
    /// configuration is looked up.
    pub workdir: PathBuf,
    pub dry_run: bool,
}

/// Outcome of a successful `new` run.
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub project_root: PathBuf,
    pub configuration: Configuration,
    pub source: ConfigSource,
    /// Features that ran to completion, as `(stage, feature)`.
    pub completed: Vec<(Stage, String)>,
    /// Features that failed and were skipped.
    pub failures: Vec<FeatureFailure>,
}

impl CreateReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Top-level orchestrator.
pub struct StackComposer {
    catalog: FeatureCatalog,
    ports: Ports,
    plugins: PluginManager,
}

impl StackComposer {
    pub fn new(catalog: FeatureCatalog, ports: Ports, plugins: PluginManager) -> Self {
        Self {
            catalog,
            ports,
            plugins,
        }
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    fn context(&self, root: impl Into<PathBuf>, dry_run: bool) -> ExecutionContext<'_> {
        ExecutionContext::from_ports(&self.ports, root, dry_run)
    }

    /// Create a new project and run every configured feature.
    #[instrument(
        skip_all,
        fields(run_id = %Uuid::new_v4(), project = %request.name, dry_run = request.dry_run)
    )]
    pub fn create(&self, request: &CreateRequest) -> BootResult<CreateReport> {
        let persisted = self.ports.config_store.load(&request.workdir)?;
        let (config, source) =
            resolve_configuration(persisted, request.preset.as_deref(), &request.name);
        info!(%source, "Configuration resolved");

        let installer = ProjectInstaller::new(self.ports.runner.as_ref());
        installer.check_prerequisites()?;

        let project_root = request.workdir.join(&request.name);
        let ctx = self.context(&project_root, request.dry_run);
        let reporter = ctx.reporter();

        reporter.progress(&format!("Creating Laravel project: {}", request.name));
        installer
            .creation_step(&request.name)
            .execute(&ctx.with_root(&request.workdir))?;

        reporter.progress("Scaffolding base architecture");
        for step in self.catalog.scaffold_steps() {
            step.execute(&ctx)?;
        }

        let mut completed = Vec::new();
        let mut failures = Vec::new();

        if let Some(kind) = config.auth {
            match AuthManager::new(&self.catalog).add_auth(kind, &ctx) {
                Ok(()) => completed.push((Stage::Auth, kind.to_string())),
                Err(error) => {
                    warn!(auth = %kind, %error, "Auth setup failed, continuing");
                    reporter.warning(&format!("auth {kind} failed: {error}"));
                    failures.push(FeatureFailure {
                        stage: Stage::Auth,
                        feature: kind.to_string(),
                        error,
                    });
                }
            }
        }

        for tier in Tier::ALL {
            let names = config.features(tier);
            if names.is_empty() {
                continue;
            }
            let report = TierManager::new(self.catalog.registry(tier)).run_features(
                &names,
                &ctx,
                FailurePolicy::Continue,
            )?;
            completed.extend(
                report
                    .completed
                    .into_iter()
                    .map(|name| (Stage::Tier(tier), name)),
            );
            failures.extend(report.failures);
        }

        self.plugins.run(&config, &ctx)?;
        DocsGenerator::step(&config).execute(&ctx)?;
        reporter.success(&format!("Laravel project '{}' is ready", request.name));

        info!(
            completed = completed.len(),
            failed = failures.len(),
            "Project created"
        );
        Ok(CreateReport {
            project_root,
            configuration: config,
            source,
            completed,
            failures,
        })
    }

    /// Add one feature to an existing project.
    ///
    /// `auth` and `all` are special names; every other name must belong to
    /// a tier (aggregates included). Fail-fast.
    #[instrument(skip_all, fields(run_id = %Uuid::new_v4(), feature = %feature, dry_run = dry_run))]
    pub fn add(&self, feature: &str, project_root: &Path, dry_run: bool) -> BootResult<()> {
        match feature {
            "auth" => {
                let ctx = self.context(project_root, dry_run);
                AuthManager::new(&self.catalog).add_auth(self.auth_kind(project_root)?, &ctx)
            }
            "all" => self.add_all(project_root, dry_run),
            name => {
                let tier = self
                    .catalog
                    .owner_of(name)
                    .ok_or_else(|| DomainError::UnknownAnyFeature {
                        name: name.to_string(),
                    })?;
                let ctx = self.context(project_root, dry_run);
                TierManager::new(self.catalog.registry(tier)).run_step(name, &ctx)
            }
        }
    }

    /// Auth, then every tier aggregate in order. The first failure stops
    /// everything.
    pub fn add_all(&self, project_root: &Path, dry_run: bool) -> BootResult<()> {
        let ctx = self.context(project_root, dry_run);
        AuthManager::new(&self.catalog).add_auth(self.auth_kind(project_root)?, &ctx)?;
        for tier in Tier::ALL {
            TierManager::new(self.catalog.registry(tier)).run_step(tier.aggregate_name(), &ctx)?;
        }
        Ok(())
    }

    /// Persist a configuration in `dir`.
    pub fn init(&self, dir: &Path, config: &Configuration) -> BootResult<PathBuf> {
        let path = self.ports.config_store.save(dir, config)?;
        info!(path = %path.display(), "Configuration saved");
        Ok(path)
    }

    /// The auth driver configured for a project, Sanctum when unset.
    fn auth_kind(&self, project_root: &Path) -> BootResult<AuthKind> {
        Ok(self
            .ports
            .config_store
            .load(project_root)?
            .and_then(|c| c.auth)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::error::{StepError, StepFailure};
    use crate::application::ports::{
        CommandOutput, MockCommandRunner, MockConfigStore, MockFilesystem, MockReporter,
    };
    use crate::application::registry::FeatureRegistry;
    use crate::application::step::StepRef;
    use crate::error::BootError;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Probe {
        name: String,
        fail: bool,
        log: Log,
    }

    impl Step for Probe {
        fn name(&self) -> &str {
            &self.name
        }

        fn execute(&self, _ctx: &ExecutionContext<'_>) -> Result<(), StepError> {
            self.log.lock().unwrap().push(self.name.clone());
            if self.fail {
                return Err(StepError::new(&self.name, StepFailure::Other("boom".into())));
            }
            Ok(())
        }
    }

    fn recording_step(log: &Log, name: &str, fail: bool) -> StepRef {
        Arc::new(Probe {
            name: name.into(),
            fail,
            log: Arc::clone(log),
        })
    }

    fn catalog(log: &Log, failing: &[&str]) -> FeatureCatalog {
        let p = |name: &str| vec![recording_step(log, name, failing.contains(&name))];
        FeatureCatalog::new(
            p("architecture"),
            FeatureRegistry::new(Tier::Platform)
                .register("roles", p("roles"))
                .unwrap()
                .register("media", p("media"))
                .unwrap(),
            FeatureRegistry::new(Tier::Infrastructure)
                .register("docker", p("docker"))
                .unwrap(),
            FeatureRegistry::new(Tier::Enterprise)
                .register("ci", p("ci"))
                .unwrap(),
        )
        .unwrap()
        .with_auth(AuthKind::Sanctum, p("sanctum"))
    }

    fn ports(config: Option<Configuration>, create_ok: bool) -> Ports {
        let mut store = MockConfigStore::new();
        store
            .expect_load()
            .returning(move |_| Ok(config.clone()));
        let mut runner = MockCommandRunner::new();
        runner
            .expect_is_available()
            .returning(|p| p != "laravel");
        runner.expect_run().returning(move |_, _| {
            Ok(if create_ok {
                CommandOutput::ok("")
            } else {
                CommandOutput::failed(1, "could not create")
            })
        });
        let mut reporter = MockReporter::new();
        reporter.expect_progress().return_const(());
        reporter.expect_warning().return_const(());
        reporter.expect_planned().return_const(());
        reporter.expect_success().return_const(());
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        Ports {
            filesystem: Box::new(fs),
            runner: Box::new(runner),
            reporter: Box::new(reporter),
            config_store: Box::new(store),
        }
    }

    fn request() -> CreateRequest {
        CreateRequest {
            name: "demo".into(),
            preset: None,
            workdir: PathBuf::from("/work"),
            dry_run: false,
        }
    }

    fn config(platform: &[&str]) -> Configuration {
        let mut cfg = Configuration::default();
        cfg.set_features(Tier::Platform, platform.iter().map(|s| s.to_string()).collect());
        cfg.set_features(Tier::Infrastructure, vec!["docker".into()]);
        cfg.set_features(Tier::Enterprise, Vec::new());
        cfg
    }

    #[test]
    fn runs_stages_in_fixed_order() {
        let log = Log::default();
        let composer = StackComposer::new(
            catalog(&log, &[]),
            ports(Some(config(&["media", "roles"])), true),
            PluginManager::new(),
        );

        let report = composer.create(&request()).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["architecture", "sanctum", "media", "roles", "docker"]
        );
        assert!(report.is_clean());
        assert_eq!(report.source, ConfigSource::File);
        assert_eq!(report.project_root, PathBuf::from("/work/demo"));
    }

    #[test]
    fn failing_feature_does_not_stop_the_run() {
        let log = Log::default();
        let composer = StackComposer::new(
            catalog(&log, &["roles"]),
            ports(Some(config(&["roles", "media"])), true),
            PluginManager::new(),
        );

        let report = composer.create(&request()).unwrap();

        assert!(log.lock().unwrap().contains(&"media".to_string()));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].feature, "roles");
    }

    #[test]
    fn unknown_configured_feature_is_skipped_with_warning() {
        let log = Log::default();
        let composer = StackComposer::new(
            catalog(&log, &[]),
            ports(Some(config(&["bogus", "roles"])), true),
            PluginManager::new(),
        );

        let report = composer.create(&request()).unwrap();

        assert_eq!(report.failures[0].feature, "bogus");
        assert!(log.lock().unwrap().contains(&"roles".to_string()));
    }

    #[test]
    fn failed_project_creation_is_fatal() {
        let log = Log::default();
        let composer = StackComposer::new(
            catalog(&log, &[]),
            ports(Some(config(&["roles"])), false),
            PluginManager::new(),
        );

        let err = composer.create(&request()).unwrap_err();

        assert_eq!(
            err.as_step_error().map(|e| e.step.as_str()),
            Some("create-project")
        );
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_scaffold_is_fatal() {
        let log = Log::default();
        let composer = StackComposer::new(
            catalog(&log, &["architecture"]),
            ports(Some(config(&["roles"])), true),
            PluginManager::new(),
        );

        assert!(composer.create(&request()).is_err());
        assert_eq!(*log.lock().unwrap(), vec!["architecture"]);
    }

    #[test]
    fn add_unknown_feature_is_a_lookup_error() {
        let log = Log::default();
        let composer =
            StackComposer::new(catalog(&log, &[]), ports(None, true), PluginManager::new());

        let err = composer.add("bogus", Path::new("/p"), false).unwrap_err();

        assert!(matches!(
            err,
            BootError::Domain(DomainError::UnknownAnyFeature { ref name }) if name == "bogus"
        ));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn add_routes_aggregates_to_their_tier() {
        let log = Log::default();
        let composer =
            StackComposer::new(catalog(&log, &[]), ports(None, true), PluginManager::new());

        composer.add("platform", Path::new("/p"), false).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["roles", "media"]);
    }

    #[test]
    fn add_all_is_fail_fast() {
        let log = Log::default();
        let composer = StackComposer::new(
            catalog(&log, &["roles"]),
            ports(None, true),
            PluginManager::new(),
        );

        assert!(composer.add_all(Path::new("/p"), false).is_err());
        assert_eq!(*log.lock().unwrap(), vec!["sanctum", "roles"]);
    }
}

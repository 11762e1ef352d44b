//! The "add a component" workflow
//!
//! A strictly linear state machine:
//!
//! ```text
//! Start -> ManifestFetched -> ComponentResolved -> ConfigLoaded
//!       -> DependenciesInstalled -> FilesMaterialized -> Done
//! ```
//!
//! Any stage can abort; the returned [`AddError`] says which one. The
//! manifest is fetched before the local config is read, so a missing config
//! is only reported after a successful registry round trip.

use crate::config::ConfigStore;
use crate::error::AddError;
use crate::events::{AddEvent, Reporter};
use crate::http::{HttpClient, ReqwestClient};
use crate::install::{DependencyInstaller, InstallOutcome};
use crate::product::{self, ProductConfig};
use crate::project::ProjectOptions;
use crate::registry::RegistryClient;
use crate::source::{DirectoryFetcher, FetchReport};
use std::path::PathBuf;
use std::sync::Arc;

/// States of the add workflow, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddStage {
    Start,
    ManifestFetched,
    ComponentResolved,
    ConfigLoaded,
    DependenciesInstalled,
    FilesMaterialized,
    Done,
}

/// Everything a successful add did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReport {
    pub component: String,
    pub destination: PathBuf,
    pub dependencies: InstallOutcome,
    pub files: FetchReport,
}

/// Sequences registry, config, installer and fetcher for one component
pub struct AddOrchestrator {
    registry: RegistryClient,
    config: ConfigStore,
    installer: DependencyInstaller,
    fetcher: DirectoryFetcher,
    project_root: PathBuf,
}

impl AddOrchestrator {
    pub fn new(
        registry: RegistryClient,
        config: ConfigStore,
        installer: DependencyInstaller,
        fetcher: DirectoryFetcher,
        project_root: PathBuf,
    ) -> Self {
        Self {
            registry,
            config,
            installer,
            fetcher,
            project_root,
        }
    }

    /// Wire up the production pipeline for a product
    pub fn from_config<C: ProductConfig>(
        config: &C,
        options: &ProjectOptions,
    ) -> anyhow::Result<Self> {
        let api_base =
            product::url_from_env(config.contents_api_env(), config.default_contents_api())?;
        let http: Arc<dyn HttpClient> =
            Arc::new(ReqwestClient::from_env(config.user_agent(), &api_base)?);

        Ok(Self::new(
            RegistryClient::from_config(config, http.clone())?,
            ConfigStore::from_config(config, &options.project_root),
            DependencyInstaller::new(options.package_manager().backend(&options.project_root)),
            DirectoryFetcher::new(http, api_base),
            options.project_root.clone(),
        ))
    }

    pub async fn run(
        &self,
        component: &str,
        reporter: &dyn Reporter,
    ) -> Result<AddReport, AddError> {
        let result = self.run_stages(component, reporter).await;
        if let Err(e) = &result {
            tracing::debug!(stage = ?e.stage(), kind = %e.kind(), "add aborted");
            reporter.report(&AddEvent::Failed { kind: e.kind() });
        }
        result
    }

    async fn run_stages(
        &self,
        component: &str,
        reporter: &dyn Reporter,
    ) -> Result<AddReport, AddError> {
        reporter.report(&AddEvent::Stage(AddStage::Start));

        // 1. Load the manifest from the registry
        reporter.report(&AddEvent::RegistryLoading {
            url: self.registry.url().to_string(),
        });
        let manifest = self.registry.fetch_manifest().await?;
        reporter.report(&AddEvent::RegistryLoaded {
            components: manifest.len(),
        });
        reporter.report(&AddEvent::Stage(AddStage::ManifestFetched));

        // 2. Resolve the requested name
        let entry = manifest
            .get(component)
            .ok_or_else(|| AddError::ComponentNotFound {
                name: component.to_string(),
                available: manifest.names(),
            })?;
        reporter.report(&AddEvent::Stage(AddStage::ComponentResolved));

        // 3. Read the project config
        reporter.report(&AddEvent::ConfigLoading {
            path: self.config.path().to_path_buf(),
        });
        let project = self.config.load().await?;
        reporter.report(&AddEvent::ConfigLoaded {
            path: self.config.path().to_path_buf(),
        });
        reporter.report(&AddEvent::Stage(AddStage::ConfigLoaded));

        // 4. Install dependencies
        let dependencies =
            install_with_events(&self.installer, entry.dependencies(), reporter).await?;
        reporter.report(&AddEvent::Stage(AddStage::DependenciesInstalled));

        // 5. Fetch the component directory
        let destination = project.component_dir(&self.project_root, component);
        let files = self.fetcher.fetch(&entry.src, &destination, reporter).await?;
        reporter.report(&AddEvent::Stage(AddStage::FilesMaterialized));

        reporter.report(&AddEvent::Stage(AddStage::Done));
        Ok(AddReport {
            component: component.to_string(),
            destination,
            dependencies,
            files,
        })
    }
}

/// Run the installer, announcing what happens
pub(crate) async fn install_with_events(
    installer: &DependencyInstaller,
    names: &[String],
    reporter: &dyn Reporter,
) -> Result<InstallOutcome, crate::error::InstallError> {
    if names.is_empty() {
        reporter.report(&AddEvent::DependenciesSkipped);
        return installer.install(names).await;
    }

    reporter.report(&AddEvent::DependenciesInstalling {
        packages: names.to_vec(),
        command: installer.describe(names),
    });
    let outcome = installer.install(names).await?;
    reporter.report(&AddEvent::DependenciesInstalled {
        packages: names.to_vec(),
    });
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;
    use crate::error::ErrorKind;
    use crate::events::SilentReporter;
    use crate::testing::{RecordingBackend, RecordingReporter, StubHttp};
    use tempfile::TempDir;
    use url::Url;

    const REGISTRY: &str = "https://registry.test/components.json";
    const API: &str = "https://api.github.test";
    const LISTING: &str =
        "https://api.github.test/repos/owner/repo/contents/components/alert?ref=main";
    const MANIFEST: &str = r#"{
        "alert": {
            "dependencies": ["clsx"],
            "src": "https://host/owner/repo/blob/refs/heads/main/components/alert"
        },
        "button": {
            "dependencies": null,
            "src": "https://host/owner/repo/blob/refs/heads/main/components/button"
        }
    }"#;
    const ALERT_LISTING: &str = r#"[
        {"name": "index.tsx", "type": "file", "download_url": "https://raw.test/alert/index.tsx"},
        {"name": "alert.css", "type": "file", "download_url": "https://raw.test/alert/alert.css"}
    ]"#;

    struct Harness {
        root: TempDir,
        http: Arc<StubHttp>,
        backend: Arc<RecordingBackend>,
        orchestrator: AddOrchestrator,
    }

    fn harness(http: StubHttp, backend: RecordingBackend) -> Harness {
        let root = TempDir::new().unwrap();
        let http = Arc::new(http);
        let backend = Arc::new(backend);
        let orchestrator = AddOrchestrator::new(
            RegistryClient::new(http.clone(), Url::parse(REGISTRY).unwrap()),
            ConfigStore::new(root.path(), ".persianuirc.json"),
            DependencyInstaller::new(backend.clone()),
            DirectoryFetcher::new(http.clone(), Url::parse(API).unwrap()),
            root.path().to_path_buf(),
        );
        Harness {
            root,
            http,
            backend,
            orchestrator,
        }
    }

    fn alert_remote() -> StubHttp {
        StubHttp::new()
            .json(REGISTRY, MANIFEST)
            .json(LISTING, ALERT_LISTING)
            .route("https://raw.test/alert/index.tsx", 200, "export function Alert() {}")
            .route("https://raw.test/alert/alert.css", 200, ".alert { color: red; }")
    }

    async fn write_config(h: &Harness) {
        ConfigStore::new(h.root.path(), ".persianuirc.json")
            .save(&ProjectConfig::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_alert_end_to_end() {
        let h = harness(alert_remote(), RecordingBackend::default());
        write_config(&h).await;

        let report = h.orchestrator.run("alert", &SilentReporter).await.unwrap();

        let expected_dir = h.root.path().join("src").join("components").join("alert");
        assert_eq!(report.destination, expected_dir);
        assert_eq!(
            report.dependencies,
            InstallOutcome::Installed {
                packages: vec!["clsx".to_string()]
            }
        );
        assert_eq!(h.backend.batches(), vec![vec!["clsx".to_string()]]);
        assert_eq!(h.http.calls_to(LISTING), 1);
        assert_eq!(report.files.written, vec!["index.tsx", "alert.css"]);
        assert_eq!(
            std::fs::read_to_string(expected_dir.join("index.tsx")).unwrap(),
            "export function Alert() {}"
        );
        assert_eq!(
            std::fs::read_to_string(expected_dir.join("alert.css")).unwrap(),
            ".alert { color: red; }"
        );
    }

    #[tokio::test]
    async fn test_unknown_component_stops_before_install_and_fetch() {
        let h = harness(alert_remote(), RecordingBackend::default());
        write_config(&h).await;

        let err = h.orchestrator.run("card", &SilentReporter).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ComponentNotFound);
        assert_eq!(err.stage(), AddStage::ManifestFetched);
        assert!(err.to_string().contains("alert, button"));
        assert!(h.backend.batches().is_empty());
        assert_eq!(h.http.calls(), vec![REGISTRY.to_string()]);
    }

    #[tokio::test]
    async fn test_null_dependencies_skip_the_installer() {
        let remote = StubHttp::new().json(REGISTRY, MANIFEST).json(
            "https://api.github.test/repos/owner/repo/contents/components/button?ref=main",
            "[]",
        );
        let h = harness(remote, RecordingBackend::default());
        write_config(&h).await;
        let reporter = RecordingReporter::default();

        let report = h.orchestrator.run("button", &reporter).await.unwrap();

        assert_eq!(report.dependencies, InstallOutcome::NothingToDo);
        assert!(h.backend.batches().is_empty());
        assert!(reporter.events().contains(&AddEvent::DependenciesSkipped));
    }

    #[tokio::test]
    async fn test_missing_config_is_detected_after_registry() {
        let h = harness(alert_remote(), RecordingBackend::default());

        let err = h.orchestrator.run("alert", &SilentReporter).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigMissing);
        assert_eq!(h.http.calls(), vec![REGISTRY.to_string()]);
        assert!(h.backend.batches().is_empty());
    }

    #[tokio::test]
    async fn test_registry_failure_aborts_at_start() {
        let h = harness(
            StubHttp::new().route(REGISTRY, 500, "oops"),
            RecordingBackend::default(),
        );
        write_config(&h).await;
        let reporter = RecordingReporter::default();

        let err = h.orchestrator.run("alert", &reporter).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RegistryUnavailable);
        assert_eq!(err.stage(), AddStage::Start);
        assert_eq!(
            reporter.events().last(),
            Some(&AddEvent::Failed {
                kind: ErrorKind::RegistryUnavailable
            })
        );
    }

    #[tokio::test]
    async fn test_install_failure_skips_fetch() {
        let h = harness(alert_remote(), RecordingBackend::failing("npm ERR! 404"));
        write_config(&h).await;

        let err = h.orchestrator.run("alert", &SilentReporter).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DependencyInstallFailed);
        assert!(err.to_string().contains("npm ERR! 404"));
        assert_eq!(h.http.calls_to(API), 0);
    }

    #[tokio::test]
    async fn test_not_a_directory_writes_nothing() {
        let remote = StubHttp::new().json(REGISTRY, MANIFEST).json(
            LISTING,
            r#"{"name": "alert", "type": "file", "download_url": "https://raw.test/alert"}"#,
        );
        let h = harness(remote, RecordingBackend::default());
        write_config(&h).await;

        let err = h.orchestrator.run("alert", &SilentReporter).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SourceNotADirectory);
        assert_eq!(err.stage(), AddStage::DependenciesInstalled);
        assert!(!h.root.path().join("src/components/alert").exists());
    }

    #[tokio::test]
    async fn test_bad_source_url_never_reaches_listing_api() {
        let remote = StubHttp::new().json(
            REGISTRY,
            r#"{"alert": {"dependencies": [], "src": "https://host/owner"}}"#,
        );
        let h = harness(remote, RecordingBackend::default());
        write_config(&h).await;

        let err = h.orchestrator.run("alert", &SilentReporter).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DirectoryLocationInvalid);
        assert_eq!(h.http.calls_to(API), 0);
    }

    #[tokio::test]
    async fn test_running_twice_is_idempotent() {
        let h = harness(alert_remote(), RecordingBackend::default());
        write_config(&h).await;

        let first = h.orchestrator.run("alert", &SilentReporter).await.unwrap();
        let snapshot = |dir: &std::path::Path| {
            let mut files: Vec<(String, Vec<u8>)> = std::fs::read_dir(dir)
                .unwrap()
                .map(|e| {
                    let e = e.unwrap();
                    (
                        e.file_name().to_string_lossy().into_owned(),
                        std::fs::read(e.path()).unwrap(),
                    )
                })
                .collect();
            files.sort();
            files
        };
        let before = snapshot(&first.destination);

        let second = h.orchestrator.run("alert", &SilentReporter).await.unwrap();

        assert_eq!(first.destination, second.destination);
        assert_eq!(before, snapshot(&second.destination));
    }

    #[tokio::test]
    async fn test_stages_are_reported_in_order() {
        let h = harness(alert_remote(), RecordingBackend::default());
        write_config(&h).await;
        let reporter = RecordingReporter::default();

        h.orchestrator.run("alert", &reporter).await.unwrap();

        let stages: Vec<AddStage> = reporter
            .events()
            .into_iter()
            .filter_map(|e| match e {
                AddEvent::Stage(stage) => Some(stage),
                _ => None,
            })
            .collect();
        assert_eq!(
            stages,
            vec![
                AddStage::Start,
                AddStage::ManifestFetched,
                AddStage::ComponentResolved,
                AddStage::ConfigLoaded,
                AddStage::DependenciesInstalled,
                AddStage::FilesMaterialized,
                AddStage::Done,
            ]
        );
    }
}

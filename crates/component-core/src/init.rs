//! The "init" workflow: write the default config, install baseline packages

use crate::add::install_with_events;
use crate::config::{ConfigStore, ProjectConfig};
use crate::error::InitError;
use crate::events::{AddEvent, Reporter};
use crate::install::{DependencyInstaller, InstallOutcome};
use crate::product::ProductConfig;
use crate::project::ProjectOptions;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub config_path: PathBuf,
    pub dependencies: InstallOutcome,
}

pub struct InitWorkflow {
    config: ConfigStore,
    installer: DependencyInstaller,
    baseline: Vec<String>,
}

impl InitWorkflow {
    pub fn new(
        config: ConfigStore,
        installer: DependencyInstaller,
        baseline: Vec<String>,
    ) -> Self {
        Self {
            config,
            installer,
            baseline,
        }
    }

    pub fn from_config<C: ProductConfig>(config: &C, options: &ProjectOptions) -> Self {
        Self::new(
            ConfigStore::from_config(config, &options.project_root),
            DependencyInstaller::new(options.package_manager().backend(&options.project_root)),
            config.baseline_dependencies(),
        )
    }

    /// Overwrites any existing config file
    pub async fn run(&self, reporter: &dyn Reporter) -> Result<InitReport, InitError> {
        let result = self.run_steps(reporter).await;
        if let Err(e) = &result {
            reporter.report(&AddEvent::Failed { kind: e.kind() });
        }
        result
    }

    async fn run_steps(&self, reporter: &dyn Reporter) -> Result<InitReport, InitError> {
        let path = self.config.path().to_path_buf();

        reporter.report(&AddEvent::ConfigWriting { path: path.clone() });
        self.config.save(&ProjectConfig::default()).await?;
        reporter.report(&AddEvent::ConfigWritten { path: path.clone() });

        let dependencies = install_with_events(&self.installer, &self.baseline, reporter).await?;

        Ok(InitReport {
            config_path: path,
            dependencies,
        })
    }
}

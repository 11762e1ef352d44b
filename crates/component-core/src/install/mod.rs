//! Dependency installation through the host package manager
//!
//! This module provides:
//! - The [`PackageBackend`] capability (one batched "add these packages" call)
//! - [`DependencyInstaller`], which owns the "nothing to do" short-circuit
//! - A process-backed implementation for npm, pnpm, yarn and bun

pub mod package_manager;

use crate::error::InstallError;
use async_trait::async_trait;

pub use package_manager::{CommandBackend, PackageManager};

/// Something that can add packages to the current project
#[async_trait]
pub trait PackageBackend: Send + Sync {
    /// Command line shown to the operator for this batch
    fn describe(&self, names: &[String]) -> String;

    /// Install every name in one invocation
    async fn add_packages(&self, names: &[String]) -> Result<(), InstallError>;
}

/// What an install call actually did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The dependency list was empty; no process was started
    NothingToDo,
    Installed { packages: Vec<String> },
}

/// Installs a component's dependencies via a [`PackageBackend`]
pub struct DependencyInstaller {
    backend: Box<dyn PackageBackend>,
}

impl DependencyInstaller {
    pub fn new(backend: impl PackageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn describe(&self, names: &[String]) -> String {
        self.backend.describe(names)
    }

    pub async fn install(&self, names: &[String]) -> Result<InstallOutcome, InstallError> {
        if names.is_empty() {
            return Ok(InstallOutcome::NothingToDo);
        }

        self.backend.add_packages(names).await?;

        Ok(InstallOutcome::Installed {
            packages: names.to_vec(),
        })
    }
}

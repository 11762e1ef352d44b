//! Component Core - Shared library for component-library CLIs
//!
//! This library provides the pipeline behind `add <component>`: resolve the
//! name against a remote manifest, install the component's npm dependencies,
//! and copy its source directory from the hosting platform into the project.
//! It is designed to be used by CLI binaries that differ only in their
//! [`ProductConfig`].
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Stages** - `RegistryClient`, `ConfigStore`, `DependencyInstaller`, `DirectoryFetcher`
//! - **Layer 2: Workflows** - `AddOrchestrator` and `InitWorkflow`, reporting through `Reporter`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based console output (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack console reporter and run helpers
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use component_core::{AddOrchestrator, ProjectOptions, SilentReporter};
//!
//! let options = ProjectOptions::resolve(None, None);
//! let orchestrator = AddOrchestrator::from_config(&MyConfig, &options)?;
//! let report = orchestrator.run("alert", &SilentReporter).await?;
//! println!("installed into {}", report.destination.display());
//! ```

pub mod add;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod init;
pub mod install;
pub mod product;
pub mod project;
pub mod registry;
pub mod source;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use add::{AddOrchestrator, AddReport, AddStage};
pub use config::{ConfigStore, ProjectConfig};
pub use error::{AddError, ErrorKind, InitError};
pub use events::{AddEvent, FnReporter, Reporter, SilentReporter};
pub use init::{InitReport, InitWorkflow};
pub use install::{DependencyInstaller, InstallOutcome, PackageBackend, PackageManager};
pub use product::ProductConfig;
pub use project::ProjectOptions;
pub use registry::{ComponentManifest, RegistryClient};
pub use source::{DirectoryFetcher, FetchReport, FileWarning, SourceLocation};

//! Error taxonomy for the add and init workflows
//!
//! Every stage returns its own typed error. [`AddError`] aggregates them and
//! knows which stage it aborted from, so the binary can decide exit status
//! in one place.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Flat classification of everything that can go wrong in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RegistryUnavailable,
    RegistryMalformed,
    ComponentNotFound,
    ConfigMissing,
    ConfigMalformed,
    DependencyInstallFailed,
    DirectoryLocationInvalid,
    DirectoryListingFailed,
    SourceNotADirectory,
    /// Non-fatal, only ever appears in a [`crate::FetchReport`]
    PerFileFetchWarning,
    DestinationWriteFailed,
}

impl ErrorKind {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ErrorKind::PerFileFetchWarning)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Failure to obtain the component manifest
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to fetch component registry from {url}: {reason}")]
    Unavailable { url: String, reason: String },

    #[error("Component registry at {url} is not a valid manifest: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Unavailable { .. } => ErrorKind::RegistryUnavailable,
            RegistryError::Malformed { .. } => ErrorKind::RegistryMalformed,
        }
    }
}

/// Failure to read or write the project configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Configuration file \"{}\" not found. Please run \"{init_command}\" first.",
        path.display()
    )]
    Missing { path: PathBuf, init_command: String },

    #[error("Failed to read {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::Missing { .. } => ErrorKind::ConfigMissing,
            ConfigError::Malformed { .. } => ErrorKind::ConfigMalformed,
            ConfigError::Write { .. } => ErrorKind::DestinationWriteFailed,
        }
    }
}

/// Failure of the external package manager
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}:\n{diagnostics}")]
    Failed {
        command: String,
        code: i32,
        diagnostics: String,
    },
}

impl InstallError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::DependencyInstallFailed
    }
}

/// Failure to materialize a remote directory locally
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid component source location: {url}")]
    LocationInvalid { url: String },

    #[error("Failed to fetch directory info from {url}: {reason}")]
    ListingFailed { url: String, reason: String },

    #[error("{url} is not a directory or the repository is private")]
    NotADirectory { url: String },

    #[error("Failed to write {}: {source}", path.display())]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::LocationInvalid { .. } => ErrorKind::DirectoryLocationInvalid,
            FetchError::ListingFailed { .. } => ErrorKind::DirectoryListingFailed,
            FetchError::NotADirectory { .. } => ErrorKind::SourceNotADirectory,
            FetchError::DestinationWrite { .. } => ErrorKind::DestinationWriteFailed,
        }
    }
}

/// Terminal failure of the add workflow
#[derive(Debug, Error)]
pub enum AddError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Component \"{name}\" not found. Available components: {}", available.join(", "))]
    ComponentNotFound { name: String, available: Vec<String> },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to install dependencies: {0}")]
    DependencyInstall(#[from] InstallError),

    #[error("Failed to fetch component: {0}")]
    DirectoryFetch(#[from] FetchError),
}

impl AddError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AddError::Registry(e) => e.kind(),
            AddError::ComponentNotFound { .. } => ErrorKind::ComponentNotFound,
            AddError::Config(e) => e.kind(),
            AddError::DependencyInstall(e) => e.kind(),
            AddError::DirectoryFetch(e) => e.kind(),
        }
    }

    /// The last stage the workflow reached before aborting
    pub fn stage(&self) -> crate::AddStage {
        use crate::AddStage;
        match self {
            AddError::Registry(_) => AddStage::Start,
            AddError::ComponentNotFound { .. } => AddStage::ManifestFetched,
            AddError::Config(_) => AddStage::ComponentResolved,
            AddError::DependencyInstall(_) => AddStage::ConfigLoaded,
            AddError::DirectoryFetch(_) => AddStage::DependenciesInstalled,
        }
    }
}

/// Terminal failure of the init workflow
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to install dependencies: {0}")]
    DependencyInstall(#[from] InstallError),
}

impl InitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InitError::Config(e) => e.kind(),
            InitError::DependencyInstall(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_not_found_lists_available_names() {
        let err = AddError::ComponentNotFound {
            name: "card".to_string(),
            available: vec!["alert".to_string(), "button".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("\"card\""));
        assert!(message.contains("alert, button"));
        assert_eq!(err.kind(), ErrorKind::ComponentNotFound);
    }

    #[test]
    fn test_fetch_errors_keep_their_kind_through_add_error() {
        let err = AddError::from(FetchError::NotADirectory {
            url: "https://example.com".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::SourceNotADirectory);
        assert_eq!(err.stage(), crate::AddStage::DependenciesInstalled);
    }

    #[test]
    fn test_only_per_file_warning_is_non_fatal() {
        assert!(!ErrorKind::PerFileFetchWarning.is_fatal());
        assert!(ErrorKind::DestinationWriteFailed.is_fatal());
        assert!(ErrorKind::ComponentNotFound.is_fatal());
    }
}

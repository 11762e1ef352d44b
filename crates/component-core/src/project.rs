//! Where the workflows run

use crate::install::PackageManager;
use std::path::PathBuf;

/// Project root and package-manager choice for one invocation
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    pub project_root: PathBuf,
    /// Forced package manager; detected from lockfiles when `None`
    pub package_manager: Option<PackageManager>,
}

impl ProjectOptions {
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            package_manager: None,
        }
    }

    /// Use `dir` if given, else the current directory
    pub fn resolve(dir: Option<PathBuf>, package_manager: Option<PackageManager>) -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let project_root = match dir {
            Some(p) if p.is_absolute() => p,
            Some(p) => current_dir.join(p),
            None => current_dir,
        };
        Self {
            project_root,
            package_manager,
        }
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
            .unwrap_or_else(|| PackageManager::detect(&self.project_root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_forced_package_manager_wins_over_lockfile() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("yarn.lock"), "").unwrap();

        let detected = ProjectOptions::new(dir.path().to_path_buf());
        assert_eq!(detected.package_manager(), PackageManager::Yarn);

        let forced =
            ProjectOptions::resolve(Some(dir.path().to_path_buf()), Some(PackageManager::Pnpm));
        assert_eq!(forced.package_manager(), PackageManager::Pnpm);
    }

    #[test]
    fn test_relative_dir_is_joined_to_current_dir() {
        let options = ProjectOptions::resolve(Some(PathBuf::from("app")), None);
        assert!(options.project_root.is_absolute());
        assert!(options.project_root.ends_with("app"));
    }
}

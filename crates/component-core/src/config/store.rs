//! Reading and writing the project configuration file

use crate::error::ConfigError;
use crate::product::ProductConfig;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Styling settings written by `init`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tailwind {
    pub version: u32,
    /// Stylesheet path, project-relative
    pub css: String,
}

impl Default for Tailwind {
    fn default() -> Self {
        Self {
            version: 4,
            css: "/src/app/globals.css".to_string(),
        }
    }
}

/// Install-target aliases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliases {
    /// Directory components are installed under, project-relative
    pub components: String,
}

impl Default for Aliases {
    fn default() -> Self {
        Self {
            components: "/src/components".to_string(),
        }
    }
}

/// Contents of the project configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_tsx")]
    pub tsx: bool,

    #[serde(default)]
    pub tailwind: Tailwind,

    pub aliases: Aliases,
}

fn default_tsx() -> bool {
    true
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            tsx: default_tsx(),
            tailwind: Tailwind::default(),
            aliases: Aliases::default(),
        }
    }
}

impl ProjectConfig {
    /// Where a component lands: `<root>/<aliases.components>/<name>`
    ///
    /// The alias is always project-relative, even with a leading `/`.
    pub fn component_dir(&self, root: &Path, name: &str) -> PathBuf {
        let mut dir = root.to_path_buf();
        for part in Path::new(&self.aliases.components).components() {
            if let Component::Normal(segment) = part {
                dir.push(segment);
            } else if part == Component::ParentDir {
                dir.push("..");
            }
        }
        dir.join(name)
    }
}

/// Loads and saves [`ProjectConfig`] at a fixed path under the project root
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    /// Command suggested when the file is missing
    init_command: String,
}

impl ConfigStore {
    pub fn new(project_root: &Path, file_name: &str) -> Self {
        Self {
            path: project_root.join(file_name),
            init_command: "init".to_string(),
        }
    }

    /// Store for a product's config file, hinting at the product's `init`
    pub fn from_config<C: ProductConfig>(config: &C, project_root: &Path) -> Self {
        Self::new(project_root, config.config_file_name())
            .with_init_command(config.init_command())
    }

    pub fn with_init_command(mut self, command: impl Into<String>) -> Self {
        self.init_command = command.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<ProjectConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::Missing {
                    path: self.path.clone(),
                    init_command: self.init_command.clone(),
                });
            }
            Err(e) => {
                return Err(ConfigError::Malformed {
                    path: self.path.clone(),
                    reason: e.to_string(),
                });
            }
        };

        let config: ProjectConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Malformed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        if config.aliases.components.trim().is_empty() {
            return Err(ConfigError::Malformed {
                path: self.path.clone(),
                reason: "'aliases.components' is empty. Please check your configuration."
                    .to_string(),
            });
        }

        Ok(config)
    }

    /// Create or overwrite the file
    pub async fn save(&self, config: &ProjectConfig) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        let mut content = serde_json::to_string_pretty(config)
            .map_err(|e| write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        content.push('\n');

        fs::write(&self.path, content).await.map_err(write_err)
    }
}

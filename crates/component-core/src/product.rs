//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface a component-library CLI implements to
//! point the shared pipeline at its own registry, config file and defaults.

use anyhow::{Context, Result};
use url::Url;

/// Configuration trait for different component-library products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Registry and contents-API locations, with env-var overrides
/// - The project config file name
/// - Dependencies installed by `init`
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Default URL of the component manifest
    fn default_registry_url(&self) -> &'static str;

    /// Environment variable name for overriding the registry URL
    fn registry_url_env(&self) -> &'static str;

    /// Base URL of the hosting platform's contents API
    fn default_contents_api(&self) -> &'static str {
        "https://api.github.com"
    }

    /// Environment variable name for overriding the contents API base
    fn contents_api_env(&self) -> &'static str;

    /// Name of the project configuration file at the project root
    fn config_file_name(&self) -> &'static str;

    /// Packages installed by `init`
    fn baseline_dependencies(&self) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }

    /// Command line shown when the project has not been initialized
    fn init_command(&self) -> String {
        format!("{} init", self.name())
    }
}

/// Resolve a URL from an env override, falling back to the product default
pub(crate) fn url_from_env(env_var: &str, default: &str) -> Result<Url> {
    let url_str = std::env::var(env_var).unwrap_or_else(|_| default.to_string());
    Url::parse(&url_str).with_context(|| format!("Invalid URL: {}", url_str))
}

//! Package manager detection and invocation

use super::PackageBackend;
use crate::error::InstallError;
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// Supported JavaScript package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

/// Lockfiles checked in order of preference
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    /// Detect the package manager a project uses from its lockfile
    pub fn detect(project_root: &Path) -> Self {
        LOCKFILES
            .iter()
            .find(|(lockfile, _)| project_root.join(lockfile).is_file())
            .map(|(_, pm)| *pm)
            // Default to npm when there is no lockfile yet
            .unwrap_or(PackageManager::Npm)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Executable to spawn (npm and friends are .cmd shims on Windows)
    fn program(&self) -> String {
        if cfg!(windows) && *self != PackageManager::Bun {
            format!("{}.cmd", self.name())
        } else {
            self.name().to_string()
        }
    }

    fn add_subcommand(&self) -> &'static str {
        match self {
            PackageManager::Npm => "install",
            PackageManager::Pnpm | PackageManager::Yarn | PackageManager::Bun => "add",
        }
    }

    /// Process backend running this package manager in `project_root`
    pub fn backend(&self, project_root: &Path) -> CommandBackend {
        CommandBackend::new(
            self.program(),
            vec![self.add_subcommand().to_string()],
            project_root,
        )
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Runs `<program> <args...> <names...>` and waits for it
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
}

impl CommandBackend {
    pub fn new(program: impl Into<String>, args: Vec<String>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args,
            cwd: cwd.to_path_buf(),
        }
    }
}

#[async_trait]
impl PackageBackend for CommandBackend {
    fn describe(&self, names: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .chain(names.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    async fn add_packages(&self, names: &[String]) -> Result<(), InstallError> {
        let command = self.describe(names);
        tracing::debug!(%command, cwd = %self.cwd.display(), "spawning package manager");

        let output = TokioCommand::new(&self.program)
            .args(&self.args)
            .args(names)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| InstallError::Spawn {
                command: command.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let diagnostics = if stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr
        };

        Err(InstallError::Failed {
            command,
            code: output.status.code().unwrap_or(-1),
            diagnostics,
        })
    }
}

//! Renders pipeline events as cliclack spinners and log lines

use crate::events::{AddEvent, Reporter};
use crate::source::FileWarning;
use cliclack::ProgressBar;
use colored::Colorize;
use std::cell::RefCell;
use std::path::Path;

/// [`Reporter`] that draws to the terminal
///
/// Long-running steps get a spinner. Per-file warnings are held back until
/// the spinner stops so they don't tear its line.
#[derive(Default)]
pub struct ConsoleReporter {
    spinner: RefCell<Option<(ProgressBar, String)>>,
    warnings: RefCell<Vec<FileWarning>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn start(&self, label: String) {
        self.fail();
        let spinner = cliclack::spinner();
        spinner.start(&label);
        *self.spinner.borrow_mut() = Some((spinner, label));
    }

    fn succeed(&self, message: String) {
        let active = self.spinner.borrow_mut().take();
        match active {
            Some((spinner, _)) => spinner.stop(message),
            None => {
                let _ = cliclack::log::success(message);
            }
        }
        self.flush_warnings();
    }

    /// Stop whatever is spinning, marking it failed
    fn fail(&self) {
        let active = self.spinner.borrow_mut().take();
        if let Some((spinner, label)) = active {
            spinner.stop(format!("{} {}", label, "failed".red()));
        }
        self.flush_warnings();
    }

    fn flush_warnings(&self) {
        let warnings: Vec<FileWarning> = self.warnings.borrow_mut().drain(..).collect();
        for warning in warnings {
            let _ = cliclack::log::warning(format!(
                "Could not fetch file: {} ({})",
                warning.name.yellow(),
                warning.reason
            ));
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: &AddEvent) {
        match event {
            AddEvent::Stage(stage) => tracing::debug!(?stage, "add stage"),
            AddEvent::RegistryLoading { url } => {
                self.start(format!("Loading component registry from {}...", url.cyan()))
            }
            AddEvent::RegistryLoaded { components } => self.succeed(format!(
                "Component registry loaded successfully ({} components).",
                components
            )),
            AddEvent::ConfigLoading { path } => {
                self.start(format!("Reading {}...", file_label(path).cyan()))
            }
            AddEvent::ConfigLoaded { path } => {
                self.succeed(format!("{} loaded successfully.", file_label(path)))
            }
            AddEvent::ConfigWriting { path } => self.start(format!(
                "Creating {} at {}...",
                file_label(path).cyan(),
                path.display().to_string().dimmed()
            )),
            AddEvent::ConfigWritten { path } => {
                self.succeed(format!("{} created successfully.", file_label(path)))
            }
            AddEvent::DependenciesSkipped => {
                let _ = cliclack::log::info("No dependencies to install.".dimmed());
            }
            AddEvent::DependenciesInstalling { packages, command } => {
                let _ = cliclack::log::info(format!("{} {}", "Running:".dimmed(), command.yellow()));
                self.start(format!(
                    "Installing dependencies: {}",
                    packages.join(", ").cyan()
                ))
            }
            AddEvent::DependenciesInstalled { .. } => {
                self.succeed("Dependencies installed successfully.".to_string())
            }
            AddEvent::FetchStarted { source, .. } => {
                self.start(format!("Fetching component from {}...", source.cyan()))
            }
            AddEvent::FileWritten { name } => tracing::debug!(%name, "file written"),
            AddEvent::FileSkipped { name } => tracing::debug!(%name, "entry skipped"),
            AddEvent::FileWarning(warning) => self.warnings.borrow_mut().push(warning.clone()),
            AddEvent::FetchFinished {
                destination,
                written,
            } => self.succeed(format!(
                "Component successfully fetched ({} files) and placed in {}.",
                written,
                destination.display().to_string().green()
            )),
            AddEvent::Failed { .. } => self.fail(),
        }
    }
}

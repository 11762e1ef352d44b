//! Charm-style CLI flows using cliclack

use super::console::ConsoleReporter;
use crate::add::{AddOrchestrator, AddReport};
use crate::init::{InitReport, InitWorkflow};
use crate::product::ProductConfig;
use crate::project::ProjectOptions;
use anyhow::{Context, Result};
use colored::Colorize;

/// Add one component, drawing progress to the terminal
pub async fn run_add<C: ProductConfig>(
    config: &C,
    options: &ProjectOptions,
    component: &str,
) -> Result<AddReport> {
    cliclack::intro(config.display_name())?;
    cliclack::log::info(format!("Adding component: {}", component.bold()))?;

    let orchestrator = AddOrchestrator::from_config(config, options)?;
    let reporter = ConsoleReporter::new();

    let report = orchestrator
        .run(component, &reporter)
        .await
        .with_context(|| format!("Failed to add component \"{}\"", component))?;

    if !report.files.warnings.is_empty() {
        cliclack::log::warning(format!(
            "{} file(s) could not be fetched",
            report.files.warnings.len()
        ))?;
    }

    cliclack::outro(
        format!("Component \"{}\" added successfully!", component)
            .green()
            .bold(),
    )?;

    Ok(report)
}

/// Write the default config and install baseline dependencies
pub async fn run_init<C: ProductConfig>(config: &C, options: &ProjectOptions) -> Result<InitReport> {
    cliclack::intro(config.display_name())?;
    cliclack::log::info(format!("Initializing {} project...", config.display_name()))?;

    let workflow = InitWorkflow::from_config(config, options);
    let reporter = ConsoleReporter::new();

    let report = workflow
        .run(&reporter)
        .await
        .with_context(|| format!("Failed to initialize {} project", config.display_name()))?;

    cliclack::outro(
        format!("{} project initialized successfully!", config.display_name())
            .green()
            .bold(),
    )?;

    Ok(report)
}

/// Print a fatal error once, with its full cause chain
pub fn report_failure(error: &anyhow::Error) {
    let _ = cliclack::log::error(format!("{:#}", error));
    let _ = cliclack::outro_cancel("Aborted.".red());
}

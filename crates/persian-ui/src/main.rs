//! Persian UI CLI - Add components from the Persian UI registry to a project

use clap::{Parser, Subcommand};
use component_core::{PackageManager, ProductConfig, ProjectOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Persian UI product configuration
#[derive(Clone)]
pub struct PersianUiConfig;

impl ProductConfig for PersianUiConfig {
    fn name(&self) -> &'static str {
        "persian-ui"
    }

    fn display_name(&self) -> &'static str {
        "Persian UI"
    }

    fn cli_description(&self) -> &'static str {
        "CLI tool for the persian-ui component library"
    }

    fn default_registry_url(&self) -> &'static str {
        "https://raw.githubusercontent.com/prhmhoseyni/persian-ui/refs/heads/main/packages/cli/libs/components.json"
    }

    fn registry_url_env(&self) -> &'static str {
        "PERSIAN_UI_REGISTRY_URL"
    }

    fn contents_api_env(&self) -> &'static str {
        "PERSIAN_UI_CONTENTS_API"
    }

    fn config_file_name(&self) -> &'static str {
        ".persianuirc.json"
    }

    fn baseline_dependencies(&self) -> Vec<String> {
        vec!["clsx".to_string()]
    }
}

#[derive(Parser, Debug)]
#[command(name = "persian-ui")]
#[command(about = "CLI tool for the persian-ui component library")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the project for persian-ui
    Init(ProjectArgs),
    /// Add a new component
    Add(AddArgs),
}

#[derive(Parser, Debug)]
pub struct ProjectArgs {
    /// Project root (defaults to the current directory)
    #[arg(long = "cwd")]
    pub cwd: Option<PathBuf>,

    /// Package manager to install dependencies with (detected from lockfiles by default)
    #[arg(long = "package-manager", value_enum)]
    pub package_manager: Option<PackageManager>,
}

impl ProjectArgs {
    fn options(&self) -> ProjectOptions {
        ProjectOptions::resolve(self.cwd.clone(), self.package_manager)
    }
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Name of the component to add
    #[arg(value_name = "COMPONENT-NAME")]
    pub component: String,

    #[command(flatten)]
    pub project: ProjectArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = PersianUiConfig;

    let result = match &args.command {
        Command::Init(project) => component_core::tui::run_init(&config, &project.options())
            .await
            .map(|_| ()),
        Command::Add(add) => {
            component_core::tui::run_add(&config, &add.project.options(), &add.component)
                .await
                .map(|_| ())
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            component_core::tui::report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

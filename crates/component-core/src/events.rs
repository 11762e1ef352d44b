//! Status events emitted by the add and init workflows
//!
//! The pipeline never prints. It describes what it is doing through
//! [`AddEvent`]s, and a [`Reporter`] decides how (or whether) to show them.

use crate::add::AddStage;
use crate::error::ErrorKind;
use crate::source::FileWarning;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddEvent {
    /// The add state machine entered a new state
    Stage(AddStage),

    RegistryLoading { url: String },
    RegistryLoaded { components: usize },

    ConfigLoading { path: PathBuf },
    ConfigLoaded { path: PathBuf },
    ConfigWriting { path: PathBuf },
    ConfigWritten { path: PathBuf },

    /// Empty dependency list, the package manager was not started
    DependenciesSkipped,
    DependenciesInstalling { packages: Vec<String>, command: String },
    DependenciesInstalled { packages: Vec<String> },

    FetchStarted { source: String, destination: PathBuf },
    FileWritten { name: String },
    /// Directory or other non-file entry, not downloaded
    FileSkipped { name: String },
    FileWarning(FileWarning),
    FetchFinished { destination: PathBuf, written: usize },

    /// The workflow aborted; the error itself is returned to the caller
    Failed { kind: ErrorKind },
}

/// Receiver of pipeline status events
pub trait Reporter {
    fn report(&self, event: &AddEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _event: &AddEvent) {}
}

/// Adapts a closure into a [`Reporter`]
pub struct FnReporter<F>(pub F);

impl<F: Fn(&AddEvent)> Reporter for FnReporter<F> {
    fn report(&self, event: &AddEvent) {
        (self.0)(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_fn_reporter_forwards_events() {
        let seen = RefCell::new(Vec::new());
        let reporter = FnReporter(|e: &AddEvent| seen.borrow_mut().push(e.clone()));

        reporter.report(&AddEvent::DependenciesSkipped);
        SilentReporter.report(&AddEvent::DependenciesSkipped);

        assert_eq!(seen.into_inner(), vec![AddEvent::DependenciesSkipped]);
    }
}

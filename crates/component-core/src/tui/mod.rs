//! Console output using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod console;
#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use console::ConsoleReporter;
#[cfg(feature = "tui")]
pub use prompts::{report_failure, run_add, run_init};

//! Project configuration file

pub mod store;

pub use store::{Aliases, ConfigStore, ProjectConfig, Tailwind};

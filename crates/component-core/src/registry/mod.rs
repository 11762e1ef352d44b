//! Remote component registry
//!
//! This module provides:
//! - Manifest types (ComponentManifest, ComponentEntry)
//! - The registry client that fetches the manifest

pub mod client;
pub mod manifest;

pub use client::RegistryClient;
pub use manifest::{ComponentEntry, ComponentManifest};

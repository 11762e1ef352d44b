//! Component manifest types and parsing

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One installable component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEntry {
    /// Third-party packages the component needs; `null` and absent mean none
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,

    /// URL of the component's source directory on the hosting platform
    pub src: String,
}

impl ComponentEntry {
    pub fn dependencies(&self) -> &[String] {
        self.dependencies.as_deref().unwrap_or_default()
    }
}

/// Remote mapping from component name to its entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentManifest {
    components: BTreeMap<String, ComponentEntry>,
}

impl ComponentManifest {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn get(&self, name: &str) -> Option<&ComponentEntry> {
        self.components.get(name)
    }

    /// Known component names, sorted
    pub fn names(&self) -> Vec<String> {
        self.components.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

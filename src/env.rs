//! Service environment descriptor

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest file name written by [`ServiceEnv::write_manifest`].
pub const MANIFEST_FILE: &str = "servir-env.json";

/// The hosting service's manifest of required runtime packages.
///
/// Each artifact declares what it needs through
/// [`add_dependencies_if_missing`](Self::add_dependencies_if_missing); the
/// bundling step persists the result next to the saved artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEnv {
    packages: Vec<String>,
}

impl ServiceEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append packages that are not already declared, preserving order.
    /// Repeated calls with the same names are no-ops.
    pub fn add_dependencies_if_missing<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if !self.contains(name) {
                self.packages.push(name.to_string());
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p == name)
    }

    /// Declared packages in declaration order.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Persist the manifest as JSON into `dir`, returning the file path.
    pub fn write_manifest(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("manifest encode failed: {e}")))?;
        std::fs::write(&path, data)?;
        Ok(path)
    }
}

//! Service artifacts
//!
//! An artifact is a named, persistable wrapper around one in-memory object.
//! Concrete adapters validate what they are handed and delegate persistence
//! to the right serializer; a service keeps its adapters in an
//! [`ArtifactSet`] and saves or loads them as a unit.

mod module;
mod pickle;

pub use module::{ModuleArtifact, MODULE_TAG};
pub use pickle::PickleArtifact;

use crate::env::ServiceEnv;
use crate::{Error, Result};
use std::any::Any;
use std::path::{Path, PathBuf};

/// Contract every artifact adapter implements.
///
/// `pack` and `load` return the artifact itself so configuration chains;
/// both run the adapter's validation before storing anything, and a failed
/// call leaves the previously stored object untouched.
pub trait Artifact: Send {
    /// Name of the artifact, fixed at construction.
    fn name(&self) -> &str;

    /// Attach an in-memory object to this artifact, validating its type.
    fn pack(&mut self, obj: Box<dyn Any + Send>) -> Result<&mut dyn Artifact>;

    /// Read the artifact back from its file under `dir`.
    fn load(&mut self, dir: &Path) -> Result<&mut dyn Artifact>;

    /// Write the artifact to its file under `dir`.
    fn save(&self, dir: &Path) -> Result<()>;

    /// The stored object, if anything has been packed or loaded.
    fn get(&self) -> Option<&(dyn Any + Send)>;

    /// Declare this artifact's runtime packages into the service environment.
    fn set_dependencies(&self, env: &mut ServiceEnv);
}

impl std::fmt::Debug for dyn Artifact + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifact").field("name", &self.name()).finish()
    }
}

/// On-disk location of an artifact: `<dir>/<name><extension>`.
pub(crate) fn artifact_path(dir: &Path, name: &str, extension: &str) -> PathBuf {
    dir.join(format!("{name}{extension}"))
}

/// Named collection of artifacts, saved and loaded as a unit.
#[derive(Default)]
pub struct ArtifactSet {
    artifacts: Vec<Box<dyn Artifact>>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artifact. Names must be unique within the set.
    pub fn add(&mut self, artifact: Box<dyn Artifact>) -> Result<()> {
        if self.get(artifact.name()).is_some() {
            return Err(Error::InvalidArgument(format!(
                "duplicate artifact name: '{}'",
                artifact.name()
            )));
        }
        self.artifacts.push(artifact);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Artifact> {
        self.artifacts
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Artifact + '_)> {
        self.artifacts
            .iter_mut()
            .find(|a| a.name() == name)
            .map(|a| &mut **a as &mut dyn Artifact)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Artifact> {
        self.artifacts.iter().map(|a| a.as_ref())
    }

    /// Save every artifact under `dir`, creating the directory first.
    pub fn save_all(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        for artifact in &self.artifacts {
            artifact.save(dir)?;
        }
        Ok(())
    }

    /// Load every artifact from its file under `dir`.
    pub fn load_all(&mut self, dir: &Path) -> Result<()> {
        for artifact in &mut self.artifacts {
            artifact.load(dir)?;
        }
        Ok(())
    }

    /// Collect every artifact's package requirements into `env`.
    pub fn set_dependencies(&self, env: &mut ServiceEnv) {
        for artifact in &self.artifacts {
            artifact.set_dependencies(env);
        }
    }
}

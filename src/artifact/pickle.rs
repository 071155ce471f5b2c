//! Pickle artifact: persistence for arbitrary serializable values

use crate::artifact::{artifact_path, Artifact};
use crate::env::ServiceEnv;
use crate::pickle::{self, Pickled};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::path::Path;

const PICKLE_EXTENSION: &str = ".pkl";

/// Artifact adapter for any serializable value.
///
/// The envelope tag is chosen per artifact, so a loader can tell a
/// tokenizer file from a label map even though both are generic pickles.
pub struct PickleArtifact<T> {
    name: String,
    file_extension: String,
    tag: String,
    value: Option<T>,
}

impl<T> PickleArtifact<T> {
    /// Create an empty artifact with the default `.pkl` extension.
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_extension: PICKLE_EXTENSION.to_string(),
            tag: tag.into(),
            value: None,
        }
    }

    /// Override the file extension. Only meaningful before first use.
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    /// The stored value.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T> Artifact for PickleArtifact<T>
where
    T: Serialize + DeserializeOwned + Any + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn pack(&mut self, obj: Box<dyn Any + Send>) -> Result<&mut dyn Artifact> {
        let value = obj.downcast::<T>().map_err(|_| {
            Error::InvalidArgument(format!(
                "pickle artifact '{}' was handed a value of an unexpected type",
                self.name
            ))
        })?;
        self.value = Some(*value);
        Ok(self)
    }

    fn load(&mut self, dir: &Path) -> Result<&mut dyn Artifact> {
        let path = artifact_path(dir, &self.name, &self.file_extension);
        let pickled = pickle::load(&path)?;
        if pickled.tag() != self.tag {
            return Err(Error::InvalidArgument(format!(
                "expected {} to contain '{}' but found '{}'",
                path.display(),
                self.tag,
                pickled.tag()
            )));
        }
        let value: T = pickled.decode()?;
        self.pack(Box::new(value))
    }

    fn save(&self, dir: &Path) -> Result<()> {
        let path = artifact_path(dir, &self.name, &self.file_extension);
        let pickled = match &self.value {
            Some(value) => Pickled::from_value(self.tag.as_str(), value)?,
            None => Pickled::none(),
        };
        pickle::dump(&pickled, &path)
    }

    fn get(&self) -> Option<&(dyn Any + Send)> {
        self.value.as_ref().map(|v| v as &(dyn Any + Send))
    }

    fn set_dependencies(&self, _env: &mut ServiceEnv) {}
}

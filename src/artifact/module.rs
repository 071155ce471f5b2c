//! Module artifact: persistence for neural modules
//!
//! Wraps one `servir_nn::Module`, persisting it through the pickle envelope
//! with the native module codec as payload. The `servir-nn` package is
//! wired in through the `nn` cargo feature; a build without it keeps the
//! artifact type but fails every pack/load with a missing-dependency error.

use crate::artifact::{artifact_path, Artifact};
use crate::env::ServiceEnv;
use crate::pickle::{self, Pickled};
use crate::Result;
use std::any::Any;
use std::path::Path;

#[cfg(feature = "nn")]
use crate::Error;
#[cfg(feature = "nn")]
use servir_nn::Module;

/// Envelope tag for natively-encoded modules.
pub const MODULE_TAG: &str = "nn.Module";

const MODULE_EXTENSION: &str = ".pt";

const NN_PACKAGE: &str = "servir-nn";

/// Named, persistable holder for one neural module.
///
/// ```no_run
/// use servir::{Artifact, ModuleArtifact};
/// use servir_nn::{Module, Tensor};
/// use std::path::Path;
///
/// let net = Module::new("mlp")
///     .with_parameter("weight", Tensor::from_vec(vec![0.1, 0.2]))?;
///
/// let mut artifact = ModuleArtifact::new("net");
/// artifact.pack(Box::new(net))?.save(Path::new("/tmp/bundle"))?;
/// # Ok::<(), servir::Error>(())
/// ```
pub struct ModuleArtifact {
    name: String,
    file_extension: String,
    #[cfg(feature = "nn")]
    module: Option<Module>,
}

impl ModuleArtifact {
    /// Create an empty artifact with the default `.pt` extension.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_extension: MODULE_EXTENSION.to_string(),
            #[cfg(feature = "nn")]
            module: None,
        }
    }

    /// Override the file extension. Only meaningful before first use.
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    /// The stored module.
    #[cfg(feature = "nn")]
    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    #[cfg(not(feature = "nn"))]
    fn missing_backend() -> crate::Error {
        crate::Error::MissingDependency(format!(
            "the {NN_PACKAGE} package is required to use ModuleArtifact; \
             rebuild with the `nn` feature enabled"
        ))
    }
}

impl Artifact for ModuleArtifact {
    fn name(&self) -> &str {
        &self.name
    }

    fn pack(&mut self, obj: Box<dyn Any + Send>) -> Result<&mut dyn Artifact> {
        #[cfg(feature = "nn")]
        {
            let module = obj.downcast::<Module>().map_err(|_| {
                Error::InvalidArgument(format!(
                    "module artifact '{}' can only pack servir_nn::Module values",
                    self.name
                ))
            })?;
            self.module = Some(*module);
            Ok(self)
        }
        #[cfg(not(feature = "nn"))]
        {
            let _ = obj;
            Err(Self::missing_backend())
        }
    }

    fn load(&mut self, dir: &Path) -> Result<&mut dyn Artifact> {
        #[cfg(feature = "nn")]
        {
            let path = artifact_path(dir, &self.name, &self.file_extension);
            let pickled = pickle::load(&path)?;
            if pickled.tag() != MODULE_TAG {
                return Err(Error::InvalidArgument(format!(
                    "expected {} to contain '{MODULE_TAG}' but found '{}'",
                    path.display(),
                    pickled.tag()
                )));
            }
            let module = servir_nn::decode(pickled.payload())?;
            tracing::debug!(name = %self.name, path = %path.display(), "loaded module artifact");
            self.pack(Box::new(module))
        }
        #[cfg(not(feature = "nn"))]
        {
            let _ = dir;
            Err(Self::missing_backend())
        }
    }

    fn save(&self, dir: &Path) -> Result<()> {
        let path = artifact_path(dir, &self.name, &self.file_extension);
        #[cfg(feature = "nn")]
        let pickled = match &self.module {
            Some(module) => Pickled::new(MODULE_TAG, servir_nn::encode(module)?),
            None => Pickled::none(),
        };
        #[cfg(not(feature = "nn"))]
        let pickled = Pickled::none();
        pickle::dump(&pickled, &path)
    }

    fn get(&self) -> Option<&(dyn Any + Send)> {
        #[cfg(feature = "nn")]
        {
            self.module.as_ref().map(|m| m as &(dyn Any + Send))
        }
        #[cfg(not(feature = "nn"))]
        {
            None
        }
    }

    fn set_dependencies(&self, env: &mut ServiceEnv) {
        tracing::warn!(
            artifact = %self.name,
            "servir does not bundle the servir-image or servir-vision helper \
             packages automatically; add them to the service environment \
             manually if this module needs them"
        );
        env.add_dependencies_if_missing([NN_PACKAGE]);
    }
}

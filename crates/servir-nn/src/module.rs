//! Module: the base model type of the serving runtime

use crate::{Error, Result, Tensor};

/// A model as the serving layer sees it: an architecture identifier plus
/// named parameters in insertion order.
///
/// Training frontends lower their networks to a `Module` before handing
/// them to servir; everything packed into a module artifact must be one.
#[derive(Debug, Clone)]
pub struct Module {
    arch: String,
    params: Vec<(String, Tensor)>,
}

impl Module {
    /// Create an empty module for the given architecture.
    pub fn new(arch: impl Into<String>) -> Self {
        Self {
            arch: arch.into(),
            params: Vec::new(),
        }
    }

    /// Add a named parameter. Names must be unique within the module.
    pub fn add_parameter(&mut self, name: impl Into<String>, tensor: Tensor) -> Result<()> {
        let name = name.into();
        if self.params.iter().any(|(n, _)| *n == name) {
            return Err(Error::DuplicateParameter(name));
        }
        self.params.push((name, tensor));
        Ok(())
    }

    /// Builder-style [`add_parameter`](Self::add_parameter).
    pub fn with_parameter(mut self, name: impl Into<String>, tensor: Tensor) -> Result<Self> {
        self.add_parameter(name, tensor)?;
        Ok(self)
    }

    /// Architecture identifier (e.g. "mlp", "transformer").
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Tensor> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    /// All parameters in insertion order.
    pub fn parameters(&self) -> &[(String, Tensor)] {
        &self.params
    }

    /// Total number of scalar parameters.
    pub fn num_parameters(&self) -> usize {
        self.params.iter().map(|(_, t)| t.len()).sum()
    }
}

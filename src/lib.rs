//! # Servir: model artifact packaging
//!
//! Servir's artifact layer turns in-memory model objects into named,
//! persistable service artifacts and back.
//!
//! - **artifact**: the [`Artifact`] contract, [`ModuleArtifact`] for neural
//!   modules, [`PickleArtifact`] for arbitrary serializable values
//! - **pickle**: the tagged binary envelope behind every artifact file
//! - **env**: the service environment descriptor artifacts declare their
//!   runtime packages into
//!
//! Neural modules come from the `servir-nn` package, wired in through the
//! `nn` cargo feature (enabled by default). A build without it keeps the
//! module artifact type but fails every pack/load with a missing-dependency
//! error.

pub mod artifact;
pub mod env;
pub mod error;
pub mod pickle;

// Re-export commonly used types
pub use artifact::{Artifact, ArtifactSet, ModuleArtifact, PickleArtifact};
pub use env::ServiceEnv;
pub use error::{Error, Result};

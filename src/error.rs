//! Error types for servir

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A required runtime package is not present in this build.
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    /// A supplied or deserialized object has the wrong type.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[cfg(feature = "nn")]
    #[error("module codec error: {0}")]
    Nn(#[from] servir_nn::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

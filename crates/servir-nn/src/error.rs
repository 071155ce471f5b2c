//! Error types for servir-nn

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("shape {shape:?} does not match buffer of length {len}")]
    ShapeMismatch { shape: Vec<usize>, len: usize },

    #[error("duplicate parameter: {0}")]
    DuplicateParameter(String),

    #[error("codec error: {0}")]
    Codec(String),
}

pub type Result<T> = std::result::Result<T, Error>;

//! # Servir NN: module and tensor layer
//!
//! servir-nn is the model substrate of the servir serving runtime. A
//! [`Module`] is an architecture identifier plus named parameter tensors,
//! and [`encode`]/[`decode`] are its native on-disk codec (safetensors).
//!
//! Tensors here are inert state: the serving layer only moves them between
//! memory and disk, it does not differentiate through them.

mod error;
mod module;
mod serial;
mod tensor;

pub use error::{Error, Result};
pub use module::Module;
pub use serial::{decode, encode};
pub use tensor::Tensor;

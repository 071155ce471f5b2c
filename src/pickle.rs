//! Tagged binary envelope for artifact files
//!
//! Every artifact file is a two-field envelope: a type tag naming what the
//! payload is, and the payload bytes themselves. The tag is what lets a
//! loader say what it actually found when handed the wrong file.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tag used for an empty slot (an artifact saved before anything was packed).
pub const NONE_TAG: &str = "none";

/// A pickled value: type tag plus opaque payload bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickled {
    tag: String,
    payload: Vec<u8>,
}

impl Pickled {
    /// Wrap already-encoded bytes under a tag.
    pub fn new(tag: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            tag: tag.into(),
            payload,
        }
    }

    /// The empty slot.
    pub fn none() -> Self {
        Self {
            tag: NONE_TAG.to_string(),
            payload: Vec::new(),
        }
    }

    /// Encode a serializable value under a tag.
    pub fn from_value<T: Serialize>(tag: impl Into<String>, value: &T) -> Result<Self> {
        let payload = bincode::serialize(value)
            .map_err(|e| Error::Serialization(format!("pickle encode failed: {e}")))?;
        Ok(Self::new(tag, payload))
    }

    /// Type tag of the payload.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn is_none(&self) -> bool {
        self.tag == NONE_TAG
    }

    /// Decode the payload as `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        bincode::deserialize(&self.payload)
            .map_err(|e| Error::Serialization(format!("pickle decode failed: {e}")))
    }
}

/// Write an envelope to `path` in binary mode.
pub fn dump(pickled: &Pickled, path: &Path) -> Result<()> {
    let bytes = bincode::serialize(pickled)
        .map_err(|e| Error::Serialization(format!("pickle encode failed: {e}")))?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Read an envelope back from `path`.
pub fn load(path: &Path) -> Result<Pickled> {
    let bytes = std::fs::read(path)?;
    bincode::deserialize(&bytes).map_err(|e| {
        Error::Serialization(format!("{}: pickle decode failed: {e}", path.display()))
    })
}

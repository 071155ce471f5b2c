//! Native module codec
//!
//! Modules are encoded as safetensors: one entry per parameter, with the
//! architecture identifier carried in the header metadata. Only `F32`
//! tensors are accepted on decode.

use crate::{Error, Module, Result, Tensor};
use safetensors::tensor::{Dtype, TensorView};
use safetensors::SafeTensors;
use std::collections::HashMap;

const ARCH_KEY: &str = "arch";

/// Encode a module into its native byte representation.
pub fn encode(module: &Module) -> Result<Vec<u8>> {
    let views: Vec<(&str, TensorView<'_>)> = module
        .parameters()
        .iter()
        .map(|(name, tensor)| {
            let bytes: &[u8] = bytemuck::cast_slice(tensor.values());
            let view = TensorView::new(Dtype::F32, tensor.shape().to_vec(), bytes)
                .map_err(|e| Error::Codec(format!("parameter '{name}': {e}")))?;
            Ok((name.as_str(), view))
        })
        .collect::<Result<_>>()?;

    let mut metadata = HashMap::new();
    metadata.insert(ARCH_KEY.to_string(), module.arch().to_string());

    safetensors::serialize(views, &Some(metadata))
        .map_err(|e| Error::Codec(format!("serialize failed: {e}")))
}

/// Decode a module from its native byte representation.
///
/// Parameters come back sorted by name; callers compare by lookup, not
/// position.
pub fn decode(bytes: &[u8]) -> Result<Module> {
    let (_, st_metadata) = SafeTensors::read_metadata(bytes)
        .map_err(|e| Error::Codec(format!("header parse failed: {e}")))?;

    let arch = st_metadata
        .metadata()
        .as_ref()
        .and_then(|m| m.get(ARCH_KEY).cloned())
        .unwrap_or_else(|| "unknown".to_string());

    let tensors = SafeTensors::deserialize(bytes)
        .map_err(|e| Error::Codec(format!("parse failed: {e}")))?;

    let mut names = tensors.names();
    names.sort_unstable();

    let mut module = Module::new(arch);
    for name in names {
        let view = tensors
            .tensor(name)
            .map_err(|e| Error::Codec(format!("parameter '{name}': {e}")))?;
        if view.dtype() != Dtype::F32 {
            return Err(Error::Codec(format!(
                "parameter '{name}' has unsupported dtype {:?}",
                view.dtype()
            )));
        }
        let data: Vec<f32> = bytemuck::pod_collect_to_vec(view.data());
        module.add_parameter(name, Tensor::new(view.shape().to_vec(), data)?)?;
    }

    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_module() -> Module {
        Module::new("mlp")
            .with_parameter(
                "layer1.weight",
                Tensor::new(vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap(),
            )
            .unwrap()
            .with_parameter("layer1.bias", Tensor::from_vec(vec![0.5, -0.5]))
            .unwrap()
    }

    #[test]
    fn test_encode_decode_preserves_parameters() {
        let original = sample_module();
        let bytes = encode(&original).unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded.arch(), "mlp");
        assert_eq!(decoded.parameters().len(), 2);

        for (name, tensor) in original.parameters() {
            let restored = decoded.parameter(name).unwrap();
            assert_eq!(restored.shape(), tensor.shape());
            for (a, b) in restored.values().iter().zip(tensor.values()) {
                assert_relative_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_decode_sorts_parameter_names() {
        let module = Module::new("mlp")
            .with_parameter("z", Tensor::from_vec(vec![1.0]))
            .unwrap()
            .with_parameter("a", Tensor::from_vec(vec![2.0]))
            .unwrap();

        let decoded = decode(&encode(&module).unwrap()).unwrap();
        let names: Vec<&str> = decoded.parameters().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["a", "z"]);
    }

    #[test]
    fn test_encode_empty_module() {
        let module = Module::new("empty");
        let decoded = decode(&encode(&module).unwrap()).unwrap();
        assert_eq!(decoded.arch(), "empty");
        assert!(decoded.parameters().is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode(b"not a safetensors buffer").unwrap_err();
        assert!(matches!(err, Error::Codec(_)));
    }

    #[test]
    fn test_decode_missing_arch_defaults_to_unknown() {
        let bytes = safetensors::serialize(Vec::<(&str, TensorView<'_>)>::new(), &None).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.arch(), "unknown");
    }
}

//! Flat parameter buffers

use crate::{Error, Result};
use ndarray::{ArrayD, IxDyn};

/// A parameter value: a flat `f32` buffer with an explicit shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl Tensor {
    /// Create a tensor, validating that `shape` describes `data`.
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(Error::ShapeMismatch {
                shape,
                len: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Zero-initialized tensor with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self {
            shape,
            data: vec![0.0; len],
        }
    }

    /// One-dimensional tensor over `data`.
    pub fn from_vec(data: Vec<f32>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// Build a tensor from an `ndarray` array.
    pub fn from_array(array: &ArrayD<f32>) -> Self {
        Self {
            shape: array.shape().to_vec(),
            data: array.iter().copied().collect(),
        }
    }

    /// Copy the tensor out as an `ndarray` array.
    pub fn to_array(&self) -> ArrayD<f32> {
        // Cannot fail: shape/length agreement is checked at construction.
        ArrayD::from_shape_vec(IxDyn(&self.shape), self.data.clone())
            .expect("shape matches buffer length")
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Number of scalar elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_new_validates_shape() {
        let t = Tensor::new(vec![2, 3], vec![0.0; 6]).unwrap();
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t.len(), 6);
    }

    #[test]
    fn test_new_rejects_mismatched_shape() {
        let err = Tensor::new(vec![2, 3], vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { len: 5, .. }));
    }

    #[test]
    fn test_zeros() {
        let t = Tensor::zeros(vec![4, 2]);
        assert_eq!(t.len(), 8);
        assert!(t.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_from_vec_is_one_dimensional() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(t.shape(), &[3]);
        assert_eq!(t.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_array_round_trip() {
        let a = array![[1.0_f32, 2.0], [3.0, 4.0]].into_dyn();
        let t = Tensor::from_array(&a);
        assert_eq!(t.shape(), &[2, 2]);
        assert_eq!(t.to_array(), a);
    }
}

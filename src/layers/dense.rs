use crate::{activation::activation::ActivationFunction, error::Result, math::tensor::Tensor};

/// One fully-connected layer: `activation(input · weights + biases)`.
///
/// Shapes: `weights` is `(input_size, size)`, `biases` is `(1, size)`.
/// Nothing is checked up front; a mismatch surfaces from the first
/// forward call as a `DimensionMismatch` or `ShapeMismatch`.
#[derive(Debug, Clone)]
pub struct Dense {
    pub weights: Tensor,
    pub biases: Tensor,
    pub activator: ActivationFunction,
}

impl Dense {
    pub fn new(weights: Tensor, biases: Tensor, activation: ActivationFunction) -> Dense {
        Dense {
            weights,
            biases,
            activator: activation,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows()
    }

    pub fn size(&self) -> usize {
        self.weights.cols()
    }

    /// Pre-activation `z = input · W + b`.
    pub fn linear(&self, input: &Tensor) -> Result<Tensor> {
        let h = Tensor::matmul(input, &self.weights)?;
        self.biases.add(&h)
    }

    pub fn feed_from(&self, input: &Tensor) -> Result<Tensor> {
        let z = self.linear(input)?;
        self.activator.apply(&z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn layer() -> Dense {
        // weights (2, 3) row-major
        let w = Tensor::from_row_major(2, 3, vec![1.0, 0.0, -1.0, 0.0, 1.0, 2.0]).unwrap();
        let b = Tensor::from_row_major(1, 3, vec![0.5, -10.0, 0.0]).unwrap();
        Dense::new(w, b, ActivationFunction::ReLU)
    }

    #[test]
    fn feed_from_applies_bias_then_relu() {
        let x = Tensor::from_row_major(1, 2, vec![2.0, 3.0]).unwrap();
        let out = layer().feed_from(&x).unwrap();
        // z = [2.5, -7.0, 4.0]
        assert_eq!(out.data(), &[2.5, 0.0, 4.0]);
    }

    #[test]
    fn wrong_input_width_is_dimension_mismatch() {
        let x = Tensor::new(1, 3);
        assert!(matches!(layer().feed_from(&x), Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn wrong_bias_width_is_shape_mismatch() {
        let mut l = layer();
        l.biases = Tensor::new(1, 2);
        let x = Tensor::new(1, 2);
        assert!(matches!(l.feed_from(&x), Err(Error::ShapeMismatch { .. })));
    }
}

use crate::error::Result;
use crate::math::tensor::Tensor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationFunction {
    ReLU,
    /// Softmax is vector-valued: it normalizes over the whole tensor, so it
    /// has no element-wise form.
    Softmax,
}

impl ActivationFunction {
    /// Applies the activation to a whole tensor.
    ///
    /// Only `Softmax` can fail (on an empty tensor).
    pub fn apply(&self, z: &Tensor) -> Result<Tensor> {
        match self {
            ActivationFunction::ReLU => Ok(z.relu()),
            ActivationFunction::Softmax => z.soft_max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_apply_clamps_negatives() {
        let t = Tensor::from_row_major(1, 4, vec![-1.5, 0.0, 0.5, 3.0]).unwrap();
        let applied = ActivationFunction::ReLU.apply(&t).unwrap();
        assert_eq!(applied.data(), &[0.0, 0.0, 0.5, 3.0]);
    }

    #[test]
    fn softmax_apply_on_single_value_is_one() {
        let t = Tensor::from_row_major(1, 1, vec![3.0]).unwrap();
        let applied = ActivationFunction::Softmax.apply(&t).unwrap();
        assert_eq!(applied.data(), &[1.0]);
    }

    #[test]
    fn softmax_apply_on_empty_fails() {
        let t = Tensor::new(0, 0);
        assert!(ActivationFunction::Softmax.apply(&t).is_err());
    }
}

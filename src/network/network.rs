use serde::Serialize;
use std::path::Path;

use crate::{
    activation::activation::ActivationFunction,
    error::{Error, Result},
    format::loader::{LoadOptions, ModelLoader, ModelWeights},
    inspect::{Inspector, Silent},
    layers::dense::Dense,
    math::tensor::Tensor,
};

/// Side length of an input digit image.
pub const IMAGE_SIDE: usize = 28;
/// Flattened input width, `28 * 28`.
pub const INPUT_SIZE: usize = IMAGE_SIDE * IMAGE_SIDE;

/// Result of one forward pass.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Index of the largest probability.
    pub digit: usize,
    pub probabilities: Vec<f32>,
}

/// The fixed two-layer classifier: `softmax(relu(x·W1 + b1)·W2 + b2)`.
#[derive(Debug, Clone)]
pub struct MnistNetwork {
    pub fc1: Dense,
    pub fc2: Dense,
}

impl MnistNetwork {
    pub fn from_weights(weights: ModelWeights) -> MnistNetwork {
        let ModelWeights { fc1w, fc1b, fc2w, fc2b } = weights;
        MnistNetwork {
            fc1: Dense::new(fc1w, fc1b, ActivationFunction::ReLU),
            fc2: Dense::new(fc2w, fc2b, ActivationFunction::Softmax),
        }
    }

    /// Loads a model file with default options.
    pub fn load(path: impl AsRef<Path>) -> Result<MnistNetwork> {
        Self::load_with(path, LoadOptions::default())
    }

    pub fn load_with(path: impl AsRef<Path>, options: LoadOptions) -> Result<MnistNetwork> {
        let weights = ModelLoader::new(options).load_path(path)?;
        Ok(MnistNetwork::from_weights(weights))
    }

    /// Runs one pass over a `(1, n)` input.
    pub fn forward(&self, input: &Tensor) -> Result<Prediction> {
        self.forward_with(input, &Silent)
    }

    /// Same as [`MnistNetwork::forward`], reporting every intermediate
    /// tensor to `inspector`.
    pub fn forward_with(&self, input: &Tensor, inspector: &dyn Inspector) -> Result<Prediction> {
        inspector.on_tensor("input", input);
        let a1 = self.fc1.feed_from(input)?;
        inspector.on_tensor("fc1", &a1);
        let z2 = self.fc2.linear(&a1)?;
        inspector.on_tensor("fc2", &z2);
        let out = self.fc2.activator.apply(&z2)?;
        inspector.on_tensor("output", &out);

        let digit = out.argmax().ok_or(Error::EmptyTensor)?;
        Ok(Prediction {
            digit,
            probabilities: out.data().to_vec(),
        })
    }
}

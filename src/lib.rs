pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod format;
pub mod inspect;
pub mod network;
pub mod input;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::{Layout, Tensor};
pub use activation::ActivationFunction;
pub use layers::Dense;
pub use format::{load_model, LayoutPolicy, LoadOptions, ModelLoader, ModelWeights};
pub use inspect::{Inspector, LogInspector, Silent};
pub use network::{MnistNetwork, Prediction};

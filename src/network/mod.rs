pub mod network;

pub use network::{MnistNetwork, Prediction, IMAGE_SIDE, INPUT_SIZE};

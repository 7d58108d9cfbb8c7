//! Hooks for observing intermediate tensors of a forward pass.
//!
//! The numeric code never prints; callers that want to see what happens
//! inside a pass hand an [`Inspector`] to
//! [`MnistNetwork::forward_with`](crate::network::MnistNetwork::forward_with).

use log::debug;

use crate::math::tensor::Tensor;

pub trait Inspector {
    /// Called once per named stage (`"input"`, `"fc1"`, `"fc2"`, `"output"`).
    fn on_tensor(&self, stage: &str, tensor: &Tensor);
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Inspector for Silent {
    fn on_tensor(&self, _stage: &str, _tensor: &Tensor) {}
}

/// Logs a shape line and a five-value preview at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogInspector;

impl Inspector for LogInspector {
    fn on_tensor(&self, stage: &str, tensor: &Tensor) {
        debug!(
            "{} ({}x{}): {}",
            stage,
            tensor.rows(),
            tensor.cols(),
            tensor.preview(5)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder(RefCell<Vec<String>>);

    impl Inspector for Recorder {
        fn on_tensor(&self, stage: &str, tensor: &Tensor) {
            self.0.borrow_mut().push(format!("{}:{}", stage, tensor.len()));
        }
    }

    #[test]
    fn inspector_is_object_safe() {
        let rec = Recorder(RefCell::new(Vec::new()));
        let hook: &dyn Inspector = &rec;
        hook.on_tensor("input", &Tensor::new(1, 3));
        Silent.on_tensor("input", &Tensor::new(1, 3));
        assert_eq!(rec.0.borrow().as_slice(), &["input:3".to_owned()]);
    }
}

pub mod layout;
pub mod tensor;

pub use layout::Layout;
pub use tensor::Tensor;

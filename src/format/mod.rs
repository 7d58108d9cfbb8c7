pub mod loader;
pub mod reader;
pub mod writer;

pub use loader::{load_model, LayoutPolicy, LoadOptions, ModelLoader, ModelWeights};
pub use writer::{save_model, write_model};

/// First four bytes of every model file (`"lmgg"` read little-endian).
pub const MAGIC: u32 = 0x67676d6c;

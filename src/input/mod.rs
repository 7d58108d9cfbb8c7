pub mod idx;
pub mod image;
pub mod render;

pub use idx::{idx_image_count, read_idx_image};
pub use self::image::image_bytes_to_digit;
pub use render::render_ascii;

//! Image preprocessing for digit inference.
//!
//! Decodes image bytes (PNG/JPEG/BMP/GIF), resizes to the network's 28x28
//! input and keeps raw 0-255 intensities, which is the range the model
//! weights were produced for.

use crate::error::{Error, Result};
use crate::math::tensor::Tensor;
use crate::network::{IMAGE_SIDE, INPUT_SIZE};

/// Decodes image bytes, resizes to 28x28, converts to grayscale.
///
/// Returns a `(1, 784)` tensor. With `invert` set, pixels become
/// `255 - p`, for dark-on-light drawings (MNIST digits are light on dark).
pub fn image_bytes_to_digit(bytes: &[u8], invert: bool) -> Result<Tensor> {
    let img = image::load_from_memory(bytes).map_err(|e| Error::Input(e.to_string()))?;
    let side = IMAGE_SIDE as u32;
    let resized = img.resize_exact(side, side, image::imageops::FilterType::Lanczos3);
    let gray = resized.to_luma8();
    let pixels: Vec<f32> = gray
        .pixels()
        .map(|p| {
            let v = p.0[0];
            if invert { (255 - v) as f32 } else { v as f32 }
        })
        .collect();
    Tensor::from_row_major(1, INPUT_SIZE, pixels)
}

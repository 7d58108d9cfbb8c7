use crate::error::{Error, Result};
use crate::math::tensor::Tensor;
use crate::network::{IMAGE_SIDE, INPUT_SIZE};

const HEADER_LEN: usize = 16;

/// Number of images declared by an IDX3 image file header.
///
/// # IDX3 image file layout
/// ```text
/// bytes  0-1:   0x00 0x00   (reserved, must be zero)
/// byte   2:     0x08        (dtype = uint8)
/// byte   3:     0x03        (number of dimensions = 3)
/// bytes  4-7:   N           (number of images, big-endian u32)
/// bytes  8-11:  rows        (image height in pixels, big-endian u32)
/// bytes 12-15:  cols        (image width in pixels, big-endian u32)
/// bytes 16..:   N * rows * cols bytes, row-major, uint8
/// ```
///
/// Only 28x28 images are accepted since that is what the network consumes.
pub fn idx_image_count(image_bytes: &[u8]) -> Result<usize> {
    if image_bytes.len() < HEADER_LEN {
        return Err(Error::Input(format!(
            "IDX image file too short: expected at least {} header bytes, got {}.",
            HEADER_LEN,
            image_bytes.len()
        )));
    }

    if image_bytes[0] != 0x00 || image_bytes[1] != 0x00 {
        return Err(Error::Input(format!(
            "IDX image file: bytes 0-1 must be 0x00 0x00 (reserved), got 0x{:02X} 0x{:02X}.",
            image_bytes[0], image_bytes[1]
        )));
    }
    if image_bytes[2] != 0x08 {
        return Err(Error::Input(format!(
            "IDX image file: byte 2 (dtype) must be 0x08 (uint8), got 0x{:02X}.",
            image_bytes[2]
        )));
    }
    if image_bytes[3] != 0x03 {
        return Err(Error::Input(format!(
            "IDX image file: byte 3 (dimensions) must be 3, got {}. \
             This does not appear to be an IDX3 image file.",
            image_bytes[3]
        )));
    }

    let n_items = be_u32(&image_bytes[4..8]) as usize;
    let rows = be_u32(&image_bytes[8..12]) as usize;
    let cols = be_u32(&image_bytes[12..16]) as usize;

    if rows != IMAGE_SIDE || cols != IMAGE_SIDE {
        return Err(Error::Input(format!(
            "IDX image file: expected {}x{} images, got {}x{}.",
            IMAGE_SIDE, IMAGE_SIDE, rows, cols
        )));
    }

    let available = (image_bytes.len() - HEADER_LEN) / INPUT_SIZE;
    if available < n_items {
        return Err(Error::Input(format!(
            "IDX image file too short: header declares {} images but only {} are present.",
            n_items, available
        )));
    }

    Ok(n_items)
}

/// Extracts image `index` as a `(1, 784)` tensor of raw pixel intensities
/// (0-255, not normalized).
pub fn read_idx_image(image_bytes: &[u8], index: usize) -> Result<Tensor> {
    let n_items = idx_image_count(image_bytes)?;
    if index >= n_items {
        return Err(Error::Input(format!(
            "IDX image index {} is out of range for a file of {} images.",
            index, n_items
        )));
    }

    let start = HEADER_LEN + index * INPUT_SIZE;
    let pixels: Vec<f32> = image_bytes[start..start + INPUT_SIZE]
        .iter()
        .map(|&px| px as f32)
        .collect();
    Ok(Tensor::from_row_major(1, INPUT_SIZE, pixels)?.named(format!("digit#{}", index)))
}

fn be_u32(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(n: u32) -> Vec<u8> {
        let mut bytes = vec![0x00, 0x00, 0x08, 0x03];
        bytes.extend_from_slice(&n.to_be_bytes());
        bytes.extend_from_slice(&28u32.to_be_bytes());
        bytes.extend_from_slice(&28u32.to_be_bytes());
        bytes
    }

    #[test]
    fn wrong_dimension_byte_is_rejected() {
        let mut bytes = header(0);
        bytes[3] = 0x01;
        assert!(matches!(idx_image_count(&bytes), Err(Error::Input(_))));
    }

    #[test]
    fn declared_count_must_be_present() {
        let mut bytes = header(2);
        bytes.extend(std::iter::repeat(0u8).take(INPUT_SIZE));
        assert!(idx_image_count(&bytes).is_err());
        bytes.extend(std::iter::repeat(0u8).take(INPUT_SIZE));
        assert_eq!(idx_image_count(&bytes).unwrap(), 2);
    }
}

#![allow(dead_code)]

/// Builds raw model-file bytes record by record, exactly as laid out on disk.
pub struct ModelBytes {
    bytes: Vec<u8>,
}

impl ModelBytes {
    pub fn new() -> ModelBytes {
        ModelBytes::with_magic(0x67676d6c)
    }

    pub fn with_magic(magic: u32) -> ModelBytes {
        ModelBytes { bytes: magic.to_le_bytes().to_vec() }
    }

    pub fn n_dims(mut self, n: i32) -> ModelBytes {
        self.bytes.extend_from_slice(&n.to_le_bytes());
        self
    }

    /// Dims followed by the payload, written verbatim.
    pub fn record(mut self, dims: &[u32], payload: &[f32]) -> ModelBytes {
        for d in dims {
            self.bytes.extend_from_slice(&d.to_le_bytes());
        }
        for x in payload {
            self.bytes.extend_from_slice(&x.to_le_bytes());
        }
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// 784x4 fc1w payload in on-disk (column-major) order with a single
/// non-zero weight at row `pixel`, column `unit`.
pub fn fc1w_single(pixel: usize, unit: usize, value: f32) -> Vec<f32> {
    let mut w = vec![0.0; 784 * 4];
    w[unit * 784 + pixel] = value;
    w
}

/// 4x10 fc2w, row-major: unit `i` feeds digit `i`, except `routed_unit`
/// which feeds `digit`.
pub fn fc2w_routing(routed_unit: usize, digit: usize) -> Vec<f32> {
    let mut w = vec![0.0; 4 * 10];
    for i in 0..4 {
        let j = if i == routed_unit { digit } else { i };
        w[i * 10 + j] = 1.0;
    }
    w
}

/// Full synthetic model: 784 -> 4 -> 10.
pub fn synthetic_model(fc1w: &[f32], fc1b: &[f32], fc2w: &[f32], fc2b: &[f32]) -> Vec<u8> {
    ModelBytes::new()
        .n_dims(2)
        .record(&[784, 4], fc1w)
        .record(&[1, 4], fc1b)
        .n_dims(2)
        .record(&[4, 10], fc2w)
        .record(&[1, 10], fc2b)
        .into_bytes()
}

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a load or a forward pass can surface.
///
/// None of these are retried internally; the caller decides whether to abort
/// or report.
#[derive(Error, Debug)]
pub enum Error {
    /// The model file does not exist.
    #[error("model file not found: {0}")]
    FileNotFound(PathBuf),

    /// The first four bytes are not the expected magic number.
    #[error("invalid model file (bad magic): expected {expected:#010x}, found {found:#010x}")]
    BadMagic { expected: u32, found: u32 },

    /// The stream ended before a record was complete.
    #[error("model file truncated while reading {record}: needed {expected} bytes, got {got}")]
    TruncatedFile {
        record: String,
        expected: usize,
        got: usize,
    },

    /// A layer header declared an unsupported number of dimensions.
    #[error("unsupported dimension count {0}; expected 1 or 2")]
    InvalidDims(i32),

    /// Elementwise operands differ in shape.
    #[error("tensors must have the same size: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Matmul inner dimensions disagree.
    #[error("matmul size error: A.cols = {} != B.rows = {}", .left.1, .right.0)]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Checked element access outside the tensor.
    #[error("index ({x}, {y}) out of bounds for {rows}x{cols} tensor")]
    OutOfBounds {
        x: usize,
        y: usize,
        rows: usize,
        cols: usize,
    },

    /// Softmax over a zero-length buffer.
    #[error("softmax of an empty tensor")]
    EmptyTensor,

    /// Initial buffer length does not match `rows * cols`.
    #[error("buffer holds {got} values but the shape needs {expected}")]
    LengthMismatch { expected: usize, got: usize },

    /// A tensor dimension does not fit the file's `u32` dims field.
    #[error("{record}: dimension {dim} does not fit in a u32")]
    DimTooLarge { record: String, dim: usize },

    /// An input image could not be decoded or is malformed.
    #[error("input error: {0}")]
    Input(String),

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound(_) => ExitCode::from(3),
            Self::BadMagic { .. }
            | Self::TruncatedFile { .. }
            | Self::InvalidDims(_)
            | Self::DimTooLarge { .. } => ExitCode::from(4),
            Self::ShapeMismatch { .. }
            | Self::DimensionMismatch { .. }
            | Self::OutOfBounds { .. }
            | Self::EmptyTensor
            | Self::LengthMismatch { .. } => ExitCode::from(5),
            Self::Input(_) => ExitCode::from(6),
            Self::Io(_) => ExitCode::from(7),
            Self::Json(_) => ExitCode::from(8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_failure_converts_with_question_mark() {
        fn encode() -> Result<String> {
            let bad: std::result::Result<u32, _> = serde_json::from_str("not json");
            Ok(bad?.to_string())
        }
        let err = encode().unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}

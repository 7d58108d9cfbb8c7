/// Orientation of a source buffer relative to the target tensor shape.
///
/// Tensors always store their data row-major. A source buffer handed to a
/// constructor is either already row-major for the target `(rows, cols)`, or
/// it is the column-major layout of that shape (equivalently, the row-major
/// layout of the `(cols, rows)` transpose) and has to be normalized on copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `src[i * cols + j]` is element `(i, j)`.
    RowMajor,
    /// `src[j * rows + i]` is element `(i, j)`.
    TransposedSource,
}

impl Layout {
    /// Shape heuristic used by existing model files: buffers for tall
    /// matrices (`rows > cols`) were written transposed.
    ///
    /// Square matrices always resolve to `RowMajor`, so a file whose square
    /// weights were written column-major needs an explicit layout instead.
    pub fn infer(rows: usize, cols: usize) -> Layout {
        if rows <= cols {
            Layout::RowMajor
        } else {
            Layout::TransposedSource
        }
    }

    /// Maps a destination (row-major) position to its offset in the source.
    #[inline]
    pub fn source_offset(self, rows: usize, cols: usize, i: usize, j: usize) -> usize {
        match self {
            Layout::RowMajor => i * cols + j,
            Layout::TransposedSource => j * rows + i,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_follows_shape() {
        assert_eq!(Layout::infer(1, 784), Layout::RowMajor);
        assert_eq!(Layout::infer(4, 4), Layout::RowMajor);
        assert_eq!(Layout::infer(784, 500), Layout::TransposedSource);
    }

    #[test]
    fn source_offsets() {
        // (3, 2) target, element (2, 1)
        assert_eq!(Layout::RowMajor.source_offset(3, 2, 2, 1), 5);
        assert_eq!(Layout::TransposedSource.source_offset(3, 2, 2, 1), 5);
        // element (1, 0)
        assert_eq!(Layout::RowMajor.source_offset(3, 2, 1, 0), 2);
        assert_eq!(Layout::TransposedSource.source_offset(3, 2, 1, 0), 1);
    }
}

use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul};

use crate::error::{Error, Result};
use crate::math::layout::Layout;

/// A dense 2-D `f32` matrix stored row-major in a single owned buffer.
///
/// `data.len() == rows * cols` holds for every value that exists; all
/// constructors either establish it or fail. Every operation returns a new
/// tensor and leaves its operands untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
    name: String,
}

impl Tensor {
    /// Zero-filled `rows x cols` tensor.
    pub fn new(rows: usize, cols: usize) -> Tensor {
        Tensor {
            rows,
            cols,
            data: vec![0.0; rows * cols],
            name: String::new(),
        }
    }

    /// Copies `data` into a new tensor, inferring its orientation from the
    /// shape (see [`Layout::infer`]).
    pub fn from_data(rows: usize, cols: usize, data: &[f32]) -> Result<Tensor> {
        Tensor::with_layout(rows, cols, data, Layout::infer(rows, cols))
    }

    /// Copies `data` into a new tensor, normalizing it from `layout` to
    /// row-major.
    pub fn with_layout(rows: usize, cols: usize, data: &[f32], layout: Layout) -> Result<Tensor> {
        check_len(rows, cols, data.len())?;
        let data = match layout {
            Layout::RowMajor => data.to_vec(),
            Layout::TransposedSource => {
                let mut res = Vec::with_capacity(data.len());
                for i in 0..rows {
                    for j in 0..cols {
                        res.push(data[layout.source_offset(rows, cols, i, j)]);
                    }
                }
                res
            }
        };
        Ok(Tensor { rows, cols, data, name: String::new() })
    }

    /// Takes ownership of a buffer that is already row-major.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f32>) -> Result<Tensor> {
        check_len(rows, cols, data.len())?;
        Ok(Tensor { rows, cols, data, name: String::new() })
    }

    /// Attaches a diagnostic label.
    pub fn named(mut self, name: impl Into<String>) -> Tensor {
        self.name = name.into();
        self
    }

    /// Deep copy. The buffer is already row-major, so it is copied verbatim.
    pub fn copy(&self) -> Tensor {
        self.clone()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bounds-checked element access at row `x`, column `y`.
    pub fn at(&self, x: usize, y: usize) -> Result<&f32> {
        self.check_in_bounds(x, y)?;
        Ok(&self.data[x * self.cols + y])
    }

    /// Mutable counterpart of [`Tensor::at`].
    pub fn at_mut(&mut self, x: usize, y: usize) -> Result<&mut f32> {
        self.check_in_bounds(x, y)?;
        let cols = self.cols;
        Ok(&mut self.data[x * cols + y])
    }

    /// Elementwise sum of two same-shape tensors.
    pub fn add(&self, other: &Tensor) -> Result<Tensor> {
        self.check_equal_size(other)?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    /// Elementwise (Hadamard) product of two same-shape tensors.
    pub fn mul(&self, other: &Tensor) -> Result<Tensor> {
        self.check_equal_size(other)?;
        Ok(self.zip_with(other, |a, b| a * b))
    }

    pub fn add_scalar(&self, c: f32) -> Tensor {
        self.map(|x| x + c)
    }

    pub fn mul_scalar(&self, c: f32) -> Tensor {
        self.map(|x| x * c)
    }

    /// Applies `functor` to every element.
    pub fn map<F>(&self, functor: F) -> Tensor
    where
        F: Fn(f32) -> f32,
    {
        Tensor {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| functor(x)).collect(),
            name: self.name.clone(),
        }
    }

    /// `max(0, x)` elementwise.
    pub fn relu(&self) -> Tensor {
        let mut rl = Tensor::new(self.rows, self.cols);
        for (i, &x) in self.data.iter().enumerate() {
            rl[i] = if x > 0.0 { x } else { 0.0 };
        }
        rl
    }

    /// Softmax over the whole flattened buffer (not per row), in log-sum-exp
    /// form: `exp(x - max - ln(sum(exp(x - max))))`.
    pub fn soft_max(&self) -> Result<Tensor> {
        if self.data.is_empty() {
            return Err(Error::EmptyTensor);
        }
        let max = self.data.iter().copied().fold(self.data[0], f32::max);
        let sum: f32 = self.data.iter().map(|&x| (x - max).exp()).sum();
        let log_sum = sum.ln();

        let mut sm = Tensor::new(self.rows, self.cols);
        for (i, &x) in self.data.iter().enumerate() {
            sm[i] = (x - max - log_sum).exp();
        }
        Ok(sm)
    }

    /// Dense product `C[i, j] = sum_k A[i, k] * B[k, j]`.
    ///
    /// The result is named after both operands.
    pub fn matmul(a: &Tensor, b: &Tensor) -> Result<Tensor> {
        if a.cols != b.rows {
            return Err(Error::DimensionMismatch {
                left: a.shape(),
                right: b.shape(),
            });
        }
        let (n, k_dim, m) = (a.rows, a.cols, b.cols);
        let mut c = Tensor::new(n, m).named(format!("{}{}", a.name, b.name));

        for i in 0..n {
            for j in 0..m {
                let mut sum = 0.0;
                for k in 0..k_dim {
                    sum += a.data[i * k_dim + k] * b.data[k * m + j];
                }
                c.data[i * m + j] = sum;
            }
        }

        Ok(c)
    }

    /// Index of the first maximum element, `None` when empty.
    pub fn argmax(&self) -> Option<usize> {
        if self.data.is_empty() {
            return None;
        }
        let mut best = 0;
        for (i, &x) in self.data.iter().enumerate().skip(1) {
            if x > self.data[best] {
                best = i;
            }
        }
        Some(best)
    }

    /// Writes the buffer out in `layout`; the inverse of
    /// [`Tensor::with_layout`].
    pub fn to_layout(&self, layout: Layout) -> Vec<f32> {
        match layout {
            Layout::RowMajor => self.data.clone(),
            Layout::TransposedSource => {
                let mut out = vec![0.0; self.data.len()];
                for i in 0..self.rows {
                    for j in 0..self.cols {
                        out[layout.source_offset(self.rows, self.cols, i, j)] =
                            self.data[i * self.cols + j];
                    }
                }
                out
            }
        }
    }

    /// First and last `n` values, e.g. `+0.000, +1.000 ... +9.000`.
    pub fn preview(&self, n: usize) -> String {
        let fmt_all = |xs: &[f32]| {
            xs.iter()
                .map(|x| format!("{:+.3}", x))
                .collect::<Vec<_>>()
                .join(", ")
        };
        if self.data.len() <= 2 * n {
            return fmt_all(&self.data);
        }
        let tail = &self.data[self.data.len() - n..];
        format!("{} ... {}", fmt_all(&self.data[..n]), fmt_all(tail))
    }

    fn zip_with<F>(&self, other: &Tensor, functor: F) -> Tensor
    where
        F: Fn(f32, f32) -> f32,
    {
        let mut result = self.copy();
        for (x, &y) in result.data.iter_mut().zip(other.data.iter()) {
            *x = functor(*x, y);
        }
        result
    }

    fn check_in_bounds(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.rows || y >= self.cols {
            return Err(Error::OutOfBounds {
                x,
                y,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn check_equal_size(&self, other: &Tensor) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }
}

fn check_len(rows: usize, cols: usize, got: usize) -> Result<()> {
    let expected = rows.checked_mul(cols).ok_or(Error::LengthMismatch {
        expected: usize::MAX,
        got,
    })?;
    if expected != got {
        return Err(Error::LengthMismatch { expected, got });
    }
    Ok(())
}

/// Linear access; `index < rows * cols` or this panics.
impl Index<usize> for Tensor {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.data[index]
    }
}

impl IndexMut<usize> for Tensor {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.data[index]
    }
}

impl Add<f32> for &Tensor {
    type Output = Tensor;

    fn add(self, rhs: f32) -> Tensor {
        self.add_scalar(rhs)
    }
}

impl Mul<f32> for &Tensor {
    type Output = Tensor;

    fn mul(self, rhs: f32) -> Tensor {
        self.mul_scalar(rhs)
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} row={} col={}", self.name, self.rows, self.cols)?;
        for row in self.data.chunks(self.cols.max(1)) {
            for x in row {
                write!(f, "{} | ", x)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed() {
        let t = Tensor::new(2, 3);
        assert_eq!(t.shape(), (2, 3));
        assert!(t.data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn at_mut_writes_in_place() {
        let mut t = Tensor::new(2, 2);
        *t.at_mut(1, 0).unwrap() = 7.0;
        assert_eq!(t[2], 7.0);
        assert!(matches!(t.at_mut(2, 0), Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn preview_elides_middle() {
        let t = Tensor::from_row_major(1, 12, (0..12).map(|x| x as f32).collect()).unwrap();
        let p = t.preview(2);
        assert_eq!(p, "+0.000, +1.000 ... +10.000, +11.000");
        let short = Tensor::from_row_major(1, 2, vec![1.0, -1.0]).unwrap();
        assert_eq!(short.preview(5), "+1.000, -1.000");
    }

    #[test]
    fn check_len_rejects_overflowing_shapes() {
        assert!(matches!(
            Tensor::from_data(usize::MAX, 2, &[]),
            Err(Error::LengthMismatch { .. })
        ));
    }
}

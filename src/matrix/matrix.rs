/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{MatrixError, Result};
use std::ops::{Index, IndexMut};

/// Tolerance used by [`Matrix::fuzzy_eq`] unless overridden per instance.
///
/// [`Matrix::fuzzy_eq`]: struct.Matrix.html#method.fuzzy_eq
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Owned dense matrix of `f64` with Fortran (column-major) layout.
///
/// Dimensions are fixed at construction. Every operation that produces a
/// matrix returns a freshly allocated one; nothing ever aliases.
///
/// A matrix computed from others takes its fuzzy-comparison tolerance from
/// the receiver, or the left operand of a binary operation. Constructors use
/// [`DEFAULT_EPSILON`].
///
/// [`DEFAULT_EPSILON`]: constant.DEFAULT_EPSILON.html
#[derive(Debug, Clone)]
pub struct Matrix {
    // column-contiguous data: (r, c) lives at c * height + r
    data: Vec<f64>,
    // invariant: height * width == data.len()
    // invariant: height > 0 && width > 0
    height: usize,
    width: usize,
    // only read by fuzzy comparisons; not structural
    epsilon: f64,
}

pub type Columns<'a> = std::slice::Chunks<'a, f64>;
pub(crate) type ColumnsMut<'a> = std::slice::ChunksMut<'a, f64>;

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Self
    { Self::filled((rows, cols), 0.0) }

    /// Zero-filled `n x n` matrix.
    pub fn new_square(n: usize) -> Self
    { Self::new(n, n) }

    pub fn zeros(rows: usize, cols: usize) -> Self
    { Self::new(rows, cols) }

    pub fn ones(rows: usize, cols: usize) -> Self
    { Self::filled((rows, cols), 1.0) }

    pub fn identity(n: usize) -> Self
    {
        let mut out = Self::new_square(n);
        for i in 0..n {
            out.data[i * n + i] = 1.0;
        }
        out
    }

    pub fn filled((rows, cols): (usize, usize), fill: f64) -> Self
    {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be positive, got {}x{}", rows, cols);
        Matrix {
            data: vec![fill; rows * cols],
            height: rows,
            width: cols,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Construct a matrix from a function on `(row, col)` indices.
    pub fn from_fn<F>((rows, cols): (usize, usize), mut f: F) -> Self
    where F: FnMut(usize, usize) -> f64,
    {
        let mut out = Self::new(rows, cols);
        for c in 0..cols {
            for r in 0..rows {
                out.data[c * rows + r] = f(r, c);
            }
        }
        out
    }

    /// Construct from data listed one row after another.
    ///
    /// Fails unless both dimensions are positive and `data` has exactly
    /// `rows * cols` elements.
    pub fn from_row_major_data((rows, cols): (usize, usize), data: Vec<f64>) -> Result<Self>
    {
        check_data_len("from_row_major_data", (rows, cols), data.len())?;
        Ok(Self::from_fn((rows, cols), |r, c| data[r * cols + c]))
    }

    /// Construct from data listed one column after another.
    pub fn from_column_major_data((rows, cols): (usize, usize), data: Vec<f64>) -> Result<Self>
    {
        check_data_len("from_column_major_data", (rows, cols), data.len())?;
        let mut out = Self::new(rows, cols);
        out.data = data;
        Ok(out)
    }

    /// Construct from a list of rows, which must all have the same, positive length.
    ///
    /// An empty list is an error.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self>
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if height == 0 || width == 0 {
            return Err(MatrixError::mismatch("from_rows", (height, width), (1, 1)));
        }
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MatrixError::mismatch("from_rows", (height, width), (1, row.len())));
            }
        }
        Ok(Self::from_fn((height, width), |r, c| rows[r].as_ref()[c]))
    }
}

// the data length is reported as a column
fn check_data_len(op: &'static str, (rows, cols): (usize, usize), len: usize) -> Result<()>
{
    match rows > 0 && cols > 0 && rows.checked_mul(cols) == Some(len) {
        true => Ok(()),
        false => Err(MatrixError::mismatch(op, (rows, cols), (len, 1))),
    }
}

// ------------------------------------------------------------------------
// dimensions and the tolerance

impl Matrix {
    pub fn num_rows(&self) -> usize { self.height }
    pub fn num_cols(&self) -> usize { self.width }
    pub fn dims(&self) -> (usize, usize) { (self.height, self.width) }
    pub fn is_square(&self) -> bool { self.height == self.width }

    pub fn epsilon(&self) -> f64 { self.epsilon }
    pub fn set_epsilon(&mut self, epsilon: f64) { self.epsilon = epsilon; }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self
    { self.epsilon = epsilon; self }
}

// ------------------------------------------------------------------------
// indexing

impl Matrix {
    #[inline(always)]
    fn offset(&self, r: usize, c: usize) -> usize
    { c * self.height + r }

    #[inline]
    fn check_index(&self, r: usize, c: usize) -> Result<usize>
    {
        match r < self.height && c < self.width {
            true => Ok(self.offset(r, c)),
            false => Err(MatrixError::OutOfRange { index: (r, c), dims: self.dims() }),
        }
    }

    #[inline]
    fn check_row(&self, r: usize) -> Result<()>
    { self.check_index(r, 0).map(drop) }

    #[inline]
    fn check_col(&self, c: usize) -> Result<()>
    { self.check_index(0, c).map(drop) }

    pub fn get(&self, r: usize, c: usize) -> Result<f64>
    { self.check_index(r, c).map(|i| self.data[i]) }

    /// Overwrites exactly one element.
    pub fn set(&mut self, r: usize, c: usize, value: f64) -> Result<()>
    {
        let i = self.check_index(r, c)?;
        self.data[i] = value;
        Ok(())
    }

    // Raw storage for the kernels. Keep these crate-private so the layout can change.
    pub(crate) fn data(&self) -> &[f64] { &self.data }
    pub(crate) fn data_mut(&mut self) -> &mut [f64] { &mut self.data }

    /// Contiguous storage of a single column.
    pub fn column(&self, c: usize) -> Result<&[f64]>
    {
        self.check_col(c)?;
        Ok(&self.data[c * self.height..(c + 1) * self.height])
    }

    pub fn columns(&self) -> Columns<'_> { self.data.chunks(self.height) }
    pub(crate) fn columns_mut(&mut self) -> ColumnsMut<'_> { self.data.chunks_mut(self.height) }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline(always)] // inlining should often remove bounds checks
    fn index(&self, (r, c): (usize, usize)) -> &f64
    {
        match self.check_index(r, c) {
            Ok(i) => &self.data[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline(always)]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64
    {
        match self.check_index(r, c) {
            Ok(i) => &mut self.data[i],
            Err(e) => panic!("{}", e),
        }
    }
}

// ------------------------------------------------------------------------
// rows and columns

impl Matrix {
    pub fn set_row(&mut self, r: usize, values: &[f64]) -> Result<()>
    {
        self.check_row(r)?;
        if values.len() != self.width {
            return Err(MatrixError::mismatch("set_row", self.dims(), (1, values.len())));
        }
        for (c, &x) in values.iter().enumerate() {
            let i = self.offset(r, c);
            self.data[i] = x;
        }
        Ok(())
    }

    pub fn set_column(&mut self, c: usize, values: &[f64]) -> Result<()>
    {
        self.check_col(c)?;
        if values.len() != self.height {
            return Err(MatrixError::mismatch("set_column", self.dims(), (values.len(), 1)));
        }
        let start = c * self.height;
        self.data[start..start + self.height].copy_from_slice(values);
        Ok(())
    }

    /// Copy of a row as a `1 x cols` matrix. `self` is left untouched.
    pub fn extract_row(&self, r: usize) -> Result<Matrix>
    {
        self.check_row(r)?;
        let row = Matrix::from_fn((1, self.width), |_, c| self.data[self.offset(r, c)]);
        Ok(row.with_epsilon(self.epsilon))
    }

    /// Copy of a column as a `rows x 1` matrix. `self` is left untouched.
    pub fn extract_column(&self, c: usize) -> Result<Matrix>
    {
        let column = self.column(c)?.to_vec();
        Ok(Matrix::from_column_major_data((self.height, 1), column)?.with_epsilon(self.epsilon))
    }

    /// Exchange two rows in place. A no-op when `a == b`.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()>
    {
        self.check_row(a)?;
        self.check_row(b)?;
        if a != b {
            for column in self.columns_mut() {
                column.swap(a, b);
            }
        }
        Ok(())
    }

    /// Exchange two columns in place. A no-op when `a == b`.
    pub fn swap_columns(&mut self, a: usize, b: usize) -> Result<()>
    {
        self.check_col(a)?;
        self.check_col(b)?;
        if a != b {
            let (lo, hi) = (a.min(b), a.max(b));
            let h = self.height;
            let (left, right) = self.data.split_at_mut(hi * h);
            left[lo * h..(lo + 1) * h].swap_with_slice(&mut right[..h]);
        }
        Ok(())
    }
}

// ------------------------------------------------------------------------
// copies and conversions

impl Matrix {
    pub fn to_transpose(&self) -> Matrix
    {
        let mut out = Matrix::new(self.width, self.height).with_epsilon(self.epsilon);
        // walk the source contiguously; the writes stride by `width`
        for (c, column) in self.columns().enumerate() {
            for (r, &x) in column.iter().enumerate() {
                out.data[r * self.width + c] = x;
            }
        }
        out
    }

    /// Rows as nested vectors, for interop and reporting.
    pub fn to_row_major_vec(&self) -> Vec<Vec<f64>>
    {
        (0..self.height)
            .map(|r| (0..self.width).map(|c| self.data[self.offset(r, c)]).collect())
            .collect()
    }

    /// Elements listed one row after another.
    pub fn to_row_major_data(&self) -> Vec<f64>
    { self.to_transpose().data }
}

/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Multiplication kernels.
//!
//! All kernels accumulate each output element over the reduction index in
//! increasing order, starting from zero. Because of this, [`naive`] and
//! [`blocked`] produce bitwise identical results, regardless of the block
//! size or of whether the blocked kernel runs in parallel.
//!
//! [`naive`]: fn.naive.html
//! [`blocked`]: fn.blocked.html

use crate::{Matrix, MatrixError, Result};
use itertools::izip;
use rayon::prelude::*;

/// How the right-hand operand of [`blocked`] is read.
///
/// [`blocked`]: fn.blocked.html
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "kebab-case"))]
pub enum Rhs {
    /// Compute `A * B`.
    Plain,
    /// Compute `A * B^T`, without ever forming `B^T`.
    Transposed,
}

/// Tuning for [`blocked`].
///
/// [`blocked`]: fn.blocked.html
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "kebab-case"))]
pub struct Blocking {
    /// Edge length of a square tile, in elements. Zero is treated as one, and
    /// anything beyond the largest dimension of the operands as that dimension.
    pub block_size: usize,
    /// Distribute column tiles of the output over the rayon thread pool.
    pub parallel: bool,
}

impl Default for Blocking {
    fn default() -> Self
    { Blocking { block_size: 64, parallel: false } }
}

/// `A * B` by a plain triple loop.
///
/// The loop order is `j-p-i`, so that the innermost loop walks a column of
/// `A` and a column of the output, both contiguous.
pub fn naive(a: &Matrix, b: &Matrix) -> Result<Matrix>
{
    if a.num_cols() != b.num_rows() {
        return Err(MatrixError::mismatch("multiplication", a.dims(), b.dims()));
    }

    let mut out = Matrix::new(a.num_rows(), b.num_cols()).with_epsilon(a.epsilon());
    for (out_col, b_col) in out.columns_mut().zip(b.columns()) {
        for (a_col, &b_pj) in a.columns().zip(b_col) {
            for (out, &a_ip) in izip!(out_col.iter_mut(), a_col) {
                *out += a_ip * b_pj;
            }
        }
    }
    Ok(out)
}

/// Cache-blocked `A * B` (or `A * B^T`, depending on `rhs`).
///
/// Same result as [`naive`] (bit for bit), computed tile by tile.
///
/// [`naive`]: fn.naive.html
pub fn blocked(a: &Matrix, b: &Matrix, rhs: Rhs, blocking: &Blocking) -> Result<Matrix>
{
    let (m, k) = a.dims();
    let (b_k, n) = match rhs {
        Rhs::Plain => b.dims(),
        Rhs::Transposed => (b.num_cols(), b.num_rows()),
    };
    if k != b_k {
        let op = match rhs {
            Rhs::Plain => "multiplication",
            Rhs::Transposed => "multiplication by transpose",
        };
        return Err(MatrixError::mismatch(op, a.dims(), b.dims()));
    }

    // tiles larger than every dimension behave the same as the largest dimension
    let bs = blocking.block_size.max(1).min(m.max(n).max(k));
    let a_data = a.data();
    let b_data = b.data();
    let b_height = b.num_rows();
    let b_at = move |p: usize, j: usize| match rhs {
        Rhs::Plain => b_data[j * b_height + p],
        Rhs::Transposed => b_data[p * b_height + j],
    };

    // Computes the output columns `j0..` held by `tile` (column-major, height m).
    let do_tile = |j0: usize, tile: &mut [f64]| {
        for p0 in (0..k).step_by(bs) {
            let p1 = usize::min(p0 + bs, k);
            for i0 in (0..m).step_by(bs) {
                let i1 = usize::min(i0 + bs, m);
                for (dj, out_col) in tile.chunks_mut(m).enumerate() {
                    let out_col = &mut out_col[i0..i1];
                    for p in p0..p1 {
                        let b_pj = b_at(p, j0 + dj);
                        let a_col = &a_data[p * m + i0..p * m + i1];
                        for (out, &a_ip) in izip!(out_col.iter_mut(), a_col) {
                            *out += a_ip * b_pj;
                        }
                    }
                }
            }
        }
    };

    let mut out = Matrix::new(m, n).with_epsilon(a.epsilon());
    let tile_len = m.saturating_mul(bs);
    match blocking.parallel {
        true => {
            out.data_mut().par_chunks_mut(tile_len).enumerate()
                .for_each(|(t, tile)| do_tile(t * bs, tile));
        },
        false => {
            out.data_mut().chunks_mut(tile_len).enumerate()
                .for_each(|(t, tile)| do_tile(t * bs, tile));
        },
    }
    Ok(out)
}

/// `A^T * B`, without forming `A^T`.
///
/// Each output element is the dot product of a column of `A` with a column
/// of `B`, so both reads are contiguous.
pub fn transpose_lhs(a: &Matrix, b: &Matrix) -> Result<Matrix>
{
    if a.num_rows() != b.num_rows() {
        return Err(MatrixError::mismatch("multiplication of transpose", a.dims(), b.dims()));
    }

    let m = a.num_cols();
    let mut out = Matrix::new(m, b.num_cols()).with_epsilon(a.epsilon());
    for (out_col, b_col) in out.columns_mut().zip(b.columns()) {
        for (out, a_col) in izip!(out_col.iter_mut(), a.columns()) {
            *out = dot(a_col, b_col);
        }
    }
    Ok(out)
}

/// Writes `R^T * K * R` into `out`.
///
/// `K` must be `n x n` for an `n x m` matrix `R`, and `out` must already be
/// `m x m`. Only one scratch vector of length `n` is allocated. When `K` is
/// symmetric (according to `K`'s own tolerance), so is the output; then only
/// its upper triangle is computed, and mirrored.
///
/// `out` is not touched if the shapes are wrong, and always keeps its own
/// tolerance.
pub fn quadratic_form(r: &Matrix, k: &Matrix, out: &mut Matrix) -> Result<()>
{
    let (n, m) = r.dims();
    if k.dims() != (n, n) {
        return Err(MatrixError::mismatch("quadratic form", r.dims(), k.dims()));
    }
    if out.dims() != (m, m) {
        return Err(MatrixError::mismatch("quadratic form output", (m, m), out.dims()));
    }

    let symmetric = k.is_symmetric();
    let mut k_r = vec![0.0; n];
    for (j, r_j) in r.columns().enumerate() {
        // k_r = K * r_j
        for x in &mut k_r {
            *x = 0.0;
        }
        for (k_col, &r_pj) in k.columns().zip(r_j) {
            for (x, &k_ip) in izip!(&mut k_r, k_col) {
                *x += k_ip * r_pj;
            }
        }

        let end = match symmetric {
            true => j + 1,
            false => m,
        };
        let out_data = out.data_mut();
        for (i, r_i) in r.columns().take(end).enumerate() {
            let value = dot(r_i, &k_r);
            out_data[j * m + i] = value;
            if symmetric {
                out_data[i * m + j] = value;
            }
        }
    }
    Ok(())
}

fn dot(a: &[f64], b: &[f64]) -> f64
{
    debug_assert_eq!(a.len(), b.len());
    izip!(a, b).fold(0.0, |acc, (x, y)| acc + x * y)
}

impl Matrix {
    /// `self * other` through the cache-blocked kernel, with default tuning.
    pub fn fast_mul(&self, other: &Matrix) -> Result<Matrix>
    { blocked(self, other, Rhs::Plain, &Blocking::default()) }

    /// `self^T * k * self`, through the fused kernel.
    pub fn quadratic_form(&self, k: &Matrix) -> Result<Matrix>
    {
        let m = self.num_cols();
        let mut out = Matrix::new(m, m).with_epsilon(self.epsilon());
        quadratic_form(self, k, &mut out)?;
        Ok(out)
    }
}

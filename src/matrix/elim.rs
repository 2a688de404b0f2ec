/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Elimination-based solvers: determinant, inverse, linear solve.
//!
//! Every routine here works on private copies of its operands.
//!
//! # Pivoting
//!
//! A diagonal element is only replaced when its magnitude falls below the
//! [`pivot_threshold`] of the original operand; the replacement is the first
//! row further down whose entry in the pivot column exceeds the threshold.
//!
//! [`pivot_threshold`]: fn.pivot_threshold.html

use crate::{Matrix, MatrixError, Result};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::ops::Range;

const RELATIVE_PIVOT_TOL: f64 = 1e-10;
// stands in for the smallest element when that is exactly zero
const ZERO_MEMBER_FALLBACK: f64 = 1e-9;

/// Magnitude below which a pivot is considered unusable.
///
/// This is `1e-10` times the smallest magnitude of any element of `m`
/// (or times `1e-9`, if that smallest magnitude is zero).
pub fn pivot_threshold(m: &Matrix) -> f64
{
    let min = m.min_abs_member();
    RELATIVE_PIVOT_TOL * match min == 0.0 {
        true => ZERO_MEMBER_FALLBACK,
        false => min,
    }
}

fn require_square(m: &Matrix, op: &'static str) -> Result<usize>
{
    match m.is_square() {
        true => Ok(m.num_rows()),
        false => Err(MatrixError::NotSquare { op, dims: m.dims() }),
    }
}

/// First row in `candidates` with a usable entry in `column`.
fn find_pivot_row(work: &Matrix, column: usize, candidates: Range<usize>, threshold: f64) -> Option<usize>
{ candidates.into_iter().find(|&r| work[(r, column)].abs() > threshold) }

/// `row[target] -= factor * row[source]`, restricted to `cols`.
fn subtract_row(m: &mut Matrix, target: usize, source: usize, factor: f64, cols: Range<usize>)
{
    let height = m.num_rows();
    let data = m.data_mut();
    for c in cols {
        let s = data[c * height + source];
        data[c * height + target] -= factor * s;
    }
}

fn scale_row(m: &mut Matrix, row: usize, factor: f64)
{
    let height = m.num_rows();
    for x in m.data_mut().iter_mut().skip(row).step_by(height) {
        *x *= factor;
    }
}

/// Gaussian elimination of a square matrix to upper triangular form, in place.
///
/// Returns the row interchanges performed, or `None` if some column has no
/// usable pivot (in which case `work` is left partially eliminated).
fn triangularize(work: &mut Matrix, threshold: f64) -> Result<Option<Vec<(usize, usize)>>>
{
    let n = work.num_rows();
    let mut swaps = vec![];
    for i in 0..n - 1 {
        if work[(i, i)].abs() < threshold {
            match find_pivot_row(work, i, i + 1..n, threshold) {
                Some(r) => {
                    trace!("determinant: swapping rows {} and {}", i, r);
                    work.swap_rows(i, r)?;
                    swaps.push((i, r));
                },
                None => {
                    debug!("determinant: no usable pivot for column {}; matrix is singular", i);
                    return Ok(None);
                },
            }
        }

        let pivot = work[(i, i)];
        for r in i + 1..n {
            let factor = work[(r, i)] / pivot;
            if factor != 0.0 {
                subtract_row(work, r, i, factor, i..n);
            }
        }
    }
    Ok(Some(swaps))
}

impl Matrix {
    /// Determinant, by Gaussian elimination.
    ///
    /// A matrix for which elimination runs out of usable pivots has a
    /// determinant of exactly zero; this is reported as `Ok(0.0)`, not as an
    /// error. The only failure is a non-square matrix.
    ///
    /// The diagonal of the eliminated matrix is multiplied in order of
    /// decreasing magnitude.
    pub fn determinant(&self) -> Result<f64>
    {
        require_square(self, "determinant")?;
        let threshold = pivot_threshold(self);

        let mut work = self.clone();
        let swaps = match triangularize(&mut work, threshold)? {
            Some(swaps) => swaps,
            None => return Ok(0.0),
        };
        let sign = match swaps.len() % 2 {
            0 => 1.0,
            _ => -1.0,
        };

        let mut diagonal: Vec<f64> = work.diagonal().collect();
        diagonal.sort_by_key(|&x| Reverse(OrderedFloat(x.abs())));
        Ok(sign * diagonal.into_iter().product::<f64>())
    }

    /// Inverse, by Gauss-Jordan elimination.
    pub fn inverse(&self) -> Result<Matrix>
    {
        let n = require_square(self, "inverse")?;
        GaussJordan::run(self, Matrix::identity(n).with_epsilon(self.epsilon())).map(GaussJordan::into_solution)
    }

    /// Solves `self * X = rhs` for `X`, without forming the inverse.
    pub fn solve(&self, rhs: &Matrix) -> Result<Matrix>
    { GaussJordan::run(self, rhs.clone().with_epsilon(self.epsilon())).map(GaussJordan::into_solution) }
}

/// Gauss-Jordan elimination of a square matrix, applied in lockstep to a
/// right-hand side.
///
/// The two buffers are kept separate rather than concatenated; every row
/// operation performed on the copy of the left-hand side is mirrored on the
/// right-hand side. Once finished the left-hand side has become the identity
/// and the right-hand side holds `A^-1 * rhs`.
#[derive(Debug, Clone)]
pub struct GaussJordan {
    lhs: Matrix,
    rhs: Matrix,
    threshold: f64,
    swaps: Vec<(usize, usize)>,
}

impl GaussJordan {
    /// Eliminate `a`, carrying `rhs` (which must have as many rows as `a`) along.
    pub fn run(a: &Matrix, rhs: Matrix) -> Result<GaussJordan>
    {
        let n = require_square(a, "gauss-jordan elimination")?;
        if rhs.num_rows() != n {
            return Err(MatrixError::mismatch("gauss-jordan elimination", a.dims(), rhs.dims()));
        }

        let mut gj = GaussJordan {
            lhs: a.clone(),
            rhs,
            threshold: pivot_threshold(a),
            swaps: vec![],
        };
        gj.forward()?;
        gj.backward()?;
        gj.normalize()?;
        Ok(gj)
    }

    pub fn solution(&self) -> &Matrix { &self.rhs }
    pub fn into_solution(self) -> Matrix { self.rhs }

    /// Row interchanges performed, in order.
    pub fn row_swaps(&self) -> &[(usize, usize)] { &self.swaps }

    /// The threshold that was used for pivots.
    pub fn threshold(&self) -> f64 { self.threshold }

    fn n(&self) -> usize { self.lhs.num_rows() }

    fn swap_rows(&mut self, a: usize, b: usize) -> Result<()>
    {
        trace!("gauss-jordan: swapping rows {} and {}", a, b);
        self.lhs.swap_rows(a, b)?;
        self.rhs.swap_rows(a, b)?;
        self.swaps.push((a, b));
        Ok(())
    }

    /// Clear column `i` of row `target`, using row `i`.
    ///
    /// Row `i` of `lhs` must be zero left of the diagonal.
    fn eliminate(&mut self, target: usize, i: usize)
    {
        let factor = self.lhs[(target, i)] / self.lhs[(i, i)];
        if factor == 0.0 {
            return;
        }
        let n = self.n();
        let rhs_cols = self.rhs.num_cols();
        subtract_row(&mut self.lhs, target, i, factor, i + 1..n);
        subtract_row(&mut self.rhs, target, i, factor, 0..rhs_cols);
        self.lhs[(target, i)] = 0.0;
    }

    // Reduce to upper triangular form.
    fn forward(&mut self) -> Result<()>
    {
        let n = self.n();
        for i in 0..n - 1 {
            if self.lhs[(i, i)].abs() < self.threshold {
                match find_pivot_row(&self.lhs, i, i + 1..n, self.threshold) {
                    Some(r) => self.swap_rows(i, r)?,
                    None => return Err(MatrixError::Singular { column: i }),
                }
            }
            for r in i + 1..n {
                self.eliminate(r, i);
            }
        }
        Ok(())
    }

    // Reduce the upper triangle to diagonal form.
    //
    // Rows above a pivot cannot stand in for it without undoing the forward
    // pass, so a bad pivot at this stage can only mean singularity.
    fn backward(&mut self) -> Result<()>
    {
        for i in (1..self.n()).rev() {
            if self.lhs[(i, i)].abs() < self.threshold {
                return Err(MatrixError::Singular { column: i });
            }
            for r in 0..i {
                self.eliminate(r, i);
            }
        }
        Ok(())
    }

    fn normalize(&mut self) -> Result<()>
    {
        for i in 0..self.n() {
            let pivot = self.lhs[(i, i)];
            if pivot.abs() < self.threshold {
                return Err(MatrixError::Singular { column: i });
            }
            scale_row(&mut self.rhs, i, 1.0 / pivot);
            self.lhs[(i, i)] = 1.0;
        }
        Ok(())
    }
}

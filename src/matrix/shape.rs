/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Shape predicates and whole-matrix reductions.
//!
//! The predicates treat anything closer to zero than `self.epsilon()` as zero.

use crate::{Matrix, MatrixError, Result};

impl Matrix {
    fn is_fuzzy_zero(&self, x: f64) -> bool
    { x.abs() < self.epsilon() }

    fn all_where<P>(&self, pred: P) -> bool
    where P: Fn(usize, usize) -> bool,
    {
        self.columns().enumerate().all(|(c, column)| {
            column.iter().enumerate()
                .filter(|&(r, _)| pred(r, c))
                .all(|(_, &x)| self.is_fuzzy_zero(x))
        })
    }

    /// Whether this equals its own transpose, up to `self.epsilon()`.
    ///
    /// Non-square matrices are never symmetric.
    pub fn is_symmetric(&self) -> bool
    {
        if !self.is_square() {
            return false;
        }
        let n = self.num_rows();
        (0..n).all(|c| (c + 1..n).all(|r| self.is_fuzzy_zero(self[(r, c)] - self[(c, r)])))
    }

    /// Everything strictly below the main diagonal is zero.
    pub fn is_upper_trapeze(&self) -> bool
    { self.all_where(|r, c| r > c) }

    /// Everything strictly above the main diagonal is zero.
    pub fn is_lower_trapeze(&self) -> bool
    { self.all_where(|r, c| r < c) }

    pub fn is_trapeze(&self) -> bool
    { self.is_upper_trapeze() || self.is_lower_trapeze() }

    pub fn is_upper_triangular(&self) -> bool
    { self.is_square() && self.is_upper_trapeze() }

    pub fn is_lower_triangular(&self) -> bool
    { self.is_square() && self.is_lower_trapeze() }

    pub fn is_triangular(&self) -> bool
    { self.is_upper_triangular() || self.is_lower_triangular() }

    /// Product of the leading diagonal (`min(rows, cols)` entries).
    pub fn diagonal_product(&self) -> f64
    { self.diagonal().product() }

    pub fn trace(&self) -> Result<f64>
    {
        if !self.is_square() {
            return Err(MatrixError::NotSquare { op: "trace", dims: self.dims() });
        }
        Ok(self.diagonal().sum())
    }

    pub(crate) fn diagonal(&self) -> impl Iterator<Item=f64> + '_
    {
        let n = usize::min(self.num_rows(), self.num_cols());
        (0..n).map(move |i| self[(i, i)])
    }

    /// Largest magnitude of any element.
    ///
    /// Handy as a residual measure: `(a - b).max_abs_member()`.
    ///
    /// NaN if any element is NaN, so that a poisoned residual never
    /// compares as small.
    pub fn max_abs_member(&self) -> f64
    {
        let mut max = 0.0;
        for &x in self.data() {
            if x.is_nan() {
                return x;
            }
            max = f64::max(max, x.abs());
        }
        max
    }

    /// Smallest magnitude of any element.
    pub fn min_abs_member(&self) -> f64
    { self.data().iter().fold(std::f64::INFINITY, |acc: f64, x| acc.min(x.abs())) }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix { Matrix::from_rows(rows).unwrap() }

    #[test]
    fn symmetry() {
        let sym = m(&[&[1.0, 2.0, 3.0], &[2.0, 5.0, 6.0], &[3.0, 6.0, 9.0]]);
        assert!(sym.is_symmetric());

        let mut nearly = sym.clone();
        nearly[(2, 0)] += 1e-14;
        assert!(nearly.is_symmetric());
        nearly[(2, 0)] += 1e-3;
        assert!(!nearly.is_symmetric());

        assert!(!Matrix::zeros(2, 3).is_symmetric());
        assert!(Matrix::identity(4).is_symmetric());
    }

    #[test]
    fn trapezes() {
        let upper = m(&[&[1.0, 2.0, 3.0], &[0.0, 5.0, 6.0]]);
        assert!(upper.is_upper_trapeze());
        assert!(!upper.is_lower_trapeze());
        assert!(upper.is_trapeze());
        assert!(!upper.is_triangular());

        let lower = upper.to_transpose();
        assert!(lower.is_lower_trapeze());
        assert!(!lower.is_upper_trapeze());
        assert!(!lower.is_lower_triangular());

        let tri = m(&[&[1.0, 0.0], &[4.0, 1.0]]);
        assert!(tri.is_lower_triangular());
        assert!(!tri.is_upper_triangular());
        assert!(tri.is_triangular());

        let mut fuzzy = tri.to_transpose();
        fuzzy[(1, 0)] = 1e-15;
        assert!(fuzzy.is_upper_triangular());

        let full = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert!(!full.is_trapeze());
        assert!(!full.is_triangular());

        let diag = Matrix::identity(3);
        assert!(diag.is_upper_triangular() && diag.is_lower_triangular());
    }

    #[test]
    fn reductions() {
        let a = m(&[&[1.0, -7.0, 3.0], &[0.5, 5.0, -6.0]]);
        assert_eq!(a.max_abs_member(), 7.0);
        assert_eq!(a.min_abs_member(), 0.5);
        assert_eq!(a.diagonal_product(), 5.0);
        assert_matches!(Err(MatrixError::NotSquare { .. }), a.trace());

        let sq = m(&[&[2.0, 9.0], &[9.0, -3.0]]);
        assert_eq!(sq.diagonal_product(), -6.0);
        assert_eq!(sq.trace(), Ok(-1.0));
        assert_eq!(Matrix::zeros(2, 2).max_abs_member(), 0.0);
    }

    #[test]
    fn max_abs_member_propagates_nan() {
        let a = m(&[&[0.0, std::f64::NAN], &[0.0, 0.5]]);
        assert!(a.max_abs_member().is_nan());
        assert!(!(a.max_abs_member() < 1e-10));

        let mut b = Matrix::ones(3, 3);
        b[(2, 2)] = std::f64::NAN;
        assert!(b.max_abs_member().is_nan());
        b[(2, 2)] = std::f64::NEG_INFINITY;
        assert_eq!(b.max_abs_member(), std::f64::INFINITY);
    }
}

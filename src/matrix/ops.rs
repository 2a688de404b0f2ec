/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Elementwise arithmetic, and the operator traits.
//!
//! The named `try_*` methods report shape problems as errors. The operator
//! impls panic on the same problems, with the same message.

use crate::{Matrix, MatrixError, Result};
use crate::mul;
use itertools::izip;
use std::ops::{Add, Sub, Mul, Neg};

impl Matrix {
    fn zip_with<F>(&self, other: &Matrix, op: &'static str, f: F) -> Result<Matrix>
    where F: Fn(f64, f64) -> f64,
    {
        if self.dims() != other.dims() {
            return Err(MatrixError::mismatch(op, self.dims(), other.dims()));
        }
        let mut out = Matrix::new(self.num_rows(), self.num_cols()).with_epsilon(self.epsilon());
        for (out, &a, &b) in izip!(out.data_mut(), self.data(), other.data()) {
            *out = f(a, b);
        }
        Ok(out)
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Matrix
    {
        let mut out = self.clone();
        for x in out.data_mut() {
            *x = f(*x);
        }
        out
    }

    pub fn try_add(&self, other: &Matrix) -> Result<Matrix>
    { self.zip_with(other, "addition", |a, b| a + b) }

    pub fn try_sub(&self, other: &Matrix) -> Result<Matrix>
    { self.zip_with(other, "subtraction", |a, b| a - b) }

    /// Matrix product, using the straightforward kernel.
    pub fn try_mul(&self, other: &Matrix) -> Result<Matrix>
    { mul::naive(self, other) }

    pub fn scaled(&self, scale: f64) -> Matrix
    { self.map(|x| scale * x) }

    pub fn negated(&self) -> Matrix
    { self.map(|x| -x) }

    /// Equality up to `self.epsilon()` in every element.
    ///
    /// This is **not** exact equality, and it is not transitive. Matrices of
    /// different shape are never equal. Note that the tolerance is read from
    /// `self` only, so `a.fuzzy_eq(&b)` and `b.fuzzy_eq(&a)` may disagree.
    pub fn fuzzy_eq(&self, other: &Matrix) -> bool
    {
        let eps = self.epsilon();
        self.dims() == other.dims()
            && self.data().iter().zip(other.data()).all(|(a, b)| (a - b).abs() < eps)
    }
}

/// Fuzzy; see [`Matrix::fuzzy_eq`].
///
/// [`Matrix::fuzzy_eq`]: struct.Matrix.html#method.fuzzy_eq
impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool
    { self.fuzzy_eq(other) }
}

fn unwrap_or_panic<T>(result: Result<T>) -> T
{
    match result {
        Ok(x) => x,
        Err(e) => panic!("{}", e),
    }
}

// generates impls for all four combinations of owned/borrowed operands
macro_rules! impl_binary {
    ($Op:ident::$op:ident => $method:ident) => {
        impl<'a, 'b> $Op<&'b Matrix> for &'a Matrix {
            type Output = Matrix;
            fn $op(self, rhs: &'b Matrix) -> Matrix
            { unwrap_or_panic(self.$method(rhs)) }
        }

        impl<'b> $Op<&'b Matrix> for Matrix {
            type Output = Matrix;
            fn $op(self, rhs: &'b Matrix) -> Matrix
            { $Op::$op(&self, rhs) }
        }

        impl<'a> $Op<Matrix> for &'a Matrix {
            type Output = Matrix;
            fn $op(self, rhs: Matrix) -> Matrix
            { $Op::$op(self, &rhs) }
        }

        impl $Op<Matrix> for Matrix {
            type Output = Matrix;
            fn $op(self, rhs: Matrix) -> Matrix
            { $Op::$op(&self, &rhs) }
        }
    };
}

impl_binary!(Add::add => try_add);
impl_binary!(Sub::sub => try_sub);
impl_binary!(Mul::mul => try_mul);

impl<'a> Mul<f64> for &'a Matrix {
    type Output = Matrix;
    fn mul(self, scale: f64) -> Matrix { self.scaled(scale) }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;
    fn mul(mut self, scale: f64) -> Matrix {
        for x in self.data_mut() { *x *= scale; }
        self
    }
}

impl<'a> Mul<&'a Matrix> for f64 {
    type Output = Matrix;
    fn mul(self, m: &'a Matrix) -> Matrix { m.scaled(self) }
}

impl Mul<Matrix> for f64 {
    type Output = Matrix;
    fn mul(self, m: Matrix) -> Matrix { m * self }
}

impl<'a> Neg for &'a Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix { self.negated() }
}

impl Neg for Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix { -1.0 * self }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::DEFAULT_EPSILON;

    fn a() -> Matrix { Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap() }
    fn b() -> Matrix { Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap() }

    #[test]
    fn add_sub() {
        assert_eq!((&a() + &b()).to_row_major_vec(), vec![vec![6.0, 8.0], vec![10.0, 12.0]]);
        assert_eq!((b() - a()).to_row_major_vec(), vec![vec![4.0, 4.0], vec![4.0, 4.0]]);
        assert_eq!((&a() - &a()).to_row_major_data(), Matrix::zeros(2, 2).to_row_major_data());
    }

    #[test]
    fn shape_checked() {
        let wide = Matrix::ones(2, 3);
        assert_eq!(
            a().try_add(&wide).unwrap_err(),
            MatrixError::DimensionMismatch { op: "addition", left: (2, 2), right: (2, 3) },
        );
        assert_matches!(Err(MatrixError::DimensionMismatch { .. }), wide.try_sub(&a()));
    }

    #[test]
    #[should_panic(expected = "incompatible shapes for addition")]
    fn add_operator_panics() {
        let _ = a() + Matrix::ones(3, 2);
    }

    #[test]
    fn scale_and_negate() {
        let expected = vec![vec![2.0, 4.0], vec![6.0, 8.0]];
        assert_eq!((2.0 * &a()).to_row_major_vec(), expected);
        assert_eq!((&a() * 2.0).to_row_major_vec(), expected);
        assert_eq!((a() * 2.0).to_row_major_vec(), expected);
        assert_eq!((2.0 * a()).to_row_major_vec(), expected);
        assert_eq!((-a()).to_row_major_vec(), vec![vec![-1.0, -2.0], vec![-3.0, -4.0]]);
        assert_eq!((-&a()).data(), a().negated().data());
    }

    #[test]
    fn product() {
        assert_eq!((a() * b()).to_row_major_vec(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
    }

    #[test]
    fn results_inherit_left_tolerance() {
        let loose = a().with_epsilon(1e-3);
        let strict = b().with_epsilon(1e-15);

        assert_eq!((&loose + &strict).epsilon(), 1e-3);
        assert_eq!((&strict - &loose).epsilon(), 1e-15);
        assert_eq!((&loose * &strict).epsilon(), 1e-3);
        assert_eq!(loose.fast_mul(&strict).unwrap().epsilon(), 1e-3);
        assert_eq!(mul::transpose_lhs(&strict, &loose).unwrap().epsilon(), 1e-15);
        assert_eq!(loose.quadratic_form(&strict).unwrap().epsilon(), 1e-3);
        assert_eq!((2.0 * &loose).epsilon(), 1e-3);
        assert_eq!((-&loose).epsilon(), 1e-3);
        assert_eq!(loose.to_transpose().epsilon(), 1e-3);
        assert_eq!(loose.extract_row(0).unwrap().epsilon(), 1e-3);
        assert_eq!(loose.extract_column(1).unwrap().epsilon(), 1e-3);
        assert_eq!(loose.inverse().unwrap().epsilon(), 1e-3);
        assert_eq!(loose.solve(&strict).unwrap().epsilon(), 1e-3);

        let mut out = Matrix::new(2, 2);
        mul::quadratic_form(&loose, &strict, &mut out).unwrap();
        assert_eq!(out.epsilon(), DEFAULT_EPSILON);
    }

    #[test]
    fn fuzzy_equality() {
        let mut nudged = a();
        nudged[(1, 1)] += 1e-14;
        assert!(a() == nudged);
        assert!(a().fuzzy_eq(&nudged));

        nudged[(1, 1)] += 1e-6;
        assert!(a() != nudged);
        // the receiver's tolerance is the one that counts
        assert!(a().with_epsilon(1e-3) == nudged);
        assert!(nudged != a());

        assert!(Matrix::zeros(2, 3) != Matrix::zeros(3, 2));
    }
}

/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense, column-major `f64` matrices.
//!
//! The storage layout is an implementation detail; element `(row, col)` is
//! always addressed through `(row, col)` pairs, and bulk conversions to
//! row-major form are provided for interop.

#[macro_use] extern crate log;
#[cfg(test)] extern crate rand;

#[cfg(test)]
macro_rules! assert_matches {
    ($pat:pat, $expr:expr,)
    => { assert_matches!($pat, $expr) };
    ($pat:pat, $expr:expr)
    => { assert_matches!($pat, $expr, "actual {:?}", $expr) };
    ($pat:pat, $expr:expr, $($arg:expr),+ $(,)*)
    => {
        match $expr {
            $pat => {},
            _ => panic!(
                "assertion failed: {} ({})",
                stringify!(assert_matches!($pat, $expr)),
                format_args!($($arg),+))
        }
    };
}

pub use crate::errors::{MatrixError, Result};
mod errors;

pub use crate::matrix::{Matrix, Columns, DEFAULT_EPSILON};
mod matrix;

mod ops;
mod shape;

pub mod mul;
pub use crate::mul::{Blocking, Rhs};

pub mod elim;
pub use crate::elim::GaussJordan;

#[cfg(test)]
mod test_util;

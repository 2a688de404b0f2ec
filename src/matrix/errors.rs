/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatrixError>;

/// Failures of the matrix engine.
///
/// A failed operation never leaves its operands modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("index {index:?} is out of range for a {}x{} matrix", .dims.0, .dims.1)]
    OutOfRange {
        index: (usize, usize),
        dims: (usize, usize),
    },

    #[error("incompatible shapes for {op}: {}x{} and {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("{op} requires a square matrix, got {}x{}", .dims.0, .dims.1)]
    NotSquare {
        op: &'static str,
        dims: (usize, usize),
    },

    #[error("matrix is singular (no usable pivot for column {column})")]
    Singular { column: usize },
}

impl MatrixError {
    pub(crate) fn mismatch(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Self
    { MatrixError::DimensionMismatch { op, left, right } }
}

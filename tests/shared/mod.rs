/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(dead_code)]

use colmat::Matrix;
use rand::{Rng, SeedableRng, XorShiftRng};

pub use colmat::bench::{random_invertible, random_matrix};

pub fn seeded_rng() -> XorShiftRng
{ XorShiftRng::from_seed([0x1234_5678, 0x9abc_def0, 0x0fed_cba9, 0x8765_4321]) }

pub fn random_symmetric<R: Rng>(rng: &mut R, n: usize) -> Matrix
{
    let half = random_matrix(rng, (n, n));
    Matrix::from_fn((n, n), |r, c| half[(r.min(c), r.max(c))])
}

/// Tolerance for residuals of O(n) accumulations over entries of order one.
pub fn size_scaled_tol(n: usize) -> f64
{ 1e-12 * n as f64 }

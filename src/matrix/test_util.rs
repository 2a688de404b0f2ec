/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::Matrix;
use rand::{Rng, SeedableRng, XorShiftRng};

// fixed so that failures are reproducible
pub fn seeded_rng() -> XorShiftRng
{ XorShiftRng::from_seed([0x5eed, 0xc01, 0x3a7, 0x42]) }

/// Entries uniform in `[-1, 1)`.
pub fn random_matrix<R: Rng>(rng: &mut R, dims: (usize, usize)) -> Matrix
{ Matrix::from_fn(dims, |_, _| rng.gen_range(-1.0, 1.0)) }

pub fn random_symmetric<R: Rng>(rng: &mut R, n: usize) -> Matrix
{
    let mut out = random_matrix(rng, (n, n));
    for c in 0..n {
        for r in c + 1..n {
            out[(c, r)] = out[(r, c)];
        }
    }
    out
}

/// Random matrix with a dominant diagonal, hence comfortably invertible.
pub fn random_invertible<R: Rng>(rng: &mut R, n: usize) -> Matrix
{
    let mut out = random_matrix(rng, (n, n));
    for i in 0..n {
        out[(i, i)] += n as f64;
    }
    out
}

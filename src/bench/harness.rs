/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{BenchConfig, FailResult, Kernel};

use colmat_matrix::{Matrix, Rhs, mul};
use rand::{Rng, SeedableRng, XorShiftRng};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Outcome of timing one kernel at one size.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Report {
    pub kernel: Kernel,
    pub size: usize,
    pub repeats: u32,
    pub mean_seconds: f64,
    /// Largest absolute difference from the reference computation.
    pub max_residual: f64,
}

/// Entries uniform in `[-1, 1)`.
pub fn random_matrix<R: Rng>(rng: &mut R, dims: (usize, usize)) -> Matrix
{ Matrix::from_fn(dims, |_, _| rng.gen_range(-1.0, 1.0)) }

/// Like [`random_matrix`], plus `n` on the diagonal, which keeps the
/// condition number small even without pivoting.
///
/// [`random_matrix`]: fn.random_matrix.html
pub fn random_invertible<R: Rng>(rng: &mut R, n: usize) -> Matrix
{
    let mut out = random_matrix(rng, (n, n));
    for i in 0..n {
        out[(i, i)] += n as f64;
    }
    out
}

pub fn run_benchmarks(config: &BenchConfig) -> FailResult<Vec<Report>>
{
    config.validate()?;

    let mut rng = XorShiftRng::from_seed(config.rng_seed());
    let mut reports = vec![];
    for &n in &config.sizes {
        let a = random_invertible(&mut rng, n);
        let b = random_matrix(&mut rng, (n, n));
        debug!("generated operands of size {}", n);

        for &kernel in &config.kernels {
            let report = bench_kernel(kernel, &a, &b, config)?;
            info!(
                "{:>20} n = {:<5} {:>12.6} s  residual {:e}",
                kernel.name(), n, report.mean_seconds, report.max_residual,
            );
            reports.push(report);
        }
    }
    Ok(reports)
}

fn bench_kernel(kernel: Kernel, a: &Matrix, b: &Matrix, config: &BenchConfig) -> FailResult<Report>
{
    let repeats = config.repeats;
    let blocking = &config.blocking;
    let n = a.num_rows();

    let (elapsed, max_residual) = match kernel {
        Kernel::Naive => {
            let (elapsed, product) = time(repeats, || mul::naive(a, b))?;
            let reference = mul::blocked(a, b, Rhs::Plain, blocking)?;
            (elapsed, residual(&product, &reference))
        },
        Kernel::Blocked => {
            let (elapsed, product) = time(repeats, || mul::blocked(a, b, Rhs::Plain, blocking))?;
            (elapsed, residual(&product, &mul::naive(a, b)?))
        },
        Kernel::BlockedTransposed => {
            let (elapsed, product) = time(repeats, || mul::blocked(a, b, Rhs::Transposed, blocking))?;
            (elapsed, residual(&product, &mul::naive(a, &b.to_transpose())?))
        },
        Kernel::QuadraticForm => {
            // symmetric part of b
            let k = (b + &b.to_transpose()) * 0.5;
            let mut out = Matrix::new(n, n);
            let (elapsed, ()) = time(repeats, || mul::quadratic_form(a, &k, &mut out))?;
            let reference = &(&a.to_transpose() * &k) * a;
            (elapsed, residual(&out, &reference))
        },
        Kernel::Determinant => {
            // scaled down so that the determinant stays within range of f64
            let a = a * (1.0 / n as f64);
            let (elapsed, det) = time(repeats, || a.determinant())?;
            let det_t = a.to_transpose().determinant()?;
            (elapsed, (det - det_t).abs() / det.abs())
        },
        Kernel::Inverse => {
            let (elapsed, inv) = time(repeats, || a.inverse())?;
            (elapsed, residual(&(&inv * a), &Matrix::identity(n)))
        },
    };

    Ok(Report {
        kernel,
        size: n,
        repeats,
        mean_seconds: elapsed.as_secs() as f64 + 1e-9 * elapsed.subsec_nanos() as f64,
        max_residual,
    })
}

fn residual(actual: &Matrix, expected: &Matrix) -> f64
{ (actual - expected).max_abs_member() }

/// Mean duration of `repeats` calls, and the output of the last.
fn time<T, F>(repeats: u32, mut f: F) -> FailResult<(Duration, T)>
where F: FnMut() -> colmat_matrix::Result<T>,
{
    let start = Instant::now();
    let mut last = f()?;
    for _ in 1..repeats {
        last = f()?;
    }
    Ok((start.elapsed() / repeats, last))
}

/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense `f64` matrices, re-exported from the workspace crates.

pub use colmat_matrix::*;

pub mod bench {
    pub use colmat_bench::{BenchConfig, Kernel, Report, run_benchmarks};
    pub use colmat_bench::{random_matrix, random_invertible};
}

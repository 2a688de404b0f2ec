/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Benchmarking harness for `colmat-matrix`.
//!
//! Times the engine's kernels on seeded random input and reports, for each,
//! the largest residual against a reference computation. It only uses the
//! public API of the engine.

#[macro_use] extern crate log;
#[macro_use] extern crate failure;

pub type FailResult<T> = Result<T, failure::Error>;

pub use crate::config::{BenchConfig, Kernel};
mod config;

pub use crate::harness::{Report, run_benchmarks, random_matrix, random_invertible};
mod harness;

pub use crate::logging::GlobalLogger;
mod logging;

pub mod entry_points;

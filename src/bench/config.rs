/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;

use colmat_matrix::Blocking;
use serde::{Serialize, Deserialize};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// Settings for a benchmark run.
///
/// Every field has a default, so a config file only needs to mention what
/// it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BenchConfig {
    /// Seed for the random operands. The same seed always produces the same matrices.
    pub seed: u32,
    /// Edge lengths of the square operands.
    pub sizes: Vec<usize>,
    /// Number of timed calls per kernel and size.
    pub repeats: u32,
    pub blocking: Blocking,
    pub kernels: Vec<Kernel>,
}

impl Default for BenchConfig {
    fn default() -> Self
    { BenchConfig {
        seed: 1,
        sizes: vec![50, 200],
        repeats: 3,
        blocking: Blocking::default(),
        kernels: Kernel::ALL.to_vec(),
    }}
}

impl BenchConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> FailResult<Self>
    {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| format_err!("could not open config {}: {}", path.display(), e))?;
        let config: BenchConfig = serde_yaml::from_reader(file)?;
        Ok(config)
    }

    pub fn validate(&self) -> FailResult<()>
    {
        if self.repeats == 0 {
            bail!("repeats must be at least 1");
        }
        if self.sizes.iter().any(|&n| n == 0) {
            bail!("matrix sizes must be positive");
        }
        if self.kernels.is_empty() {
            bail!("no kernels selected");
        }
        Ok(())
    }

    /// Seed for an `XorShiftRng`, which must not be all zeros.
    pub(crate) fn rng_seed(&self) -> [u32; 4]
    { [0x193a_6754, 0xa8a7_d469, 0x9783_0e05, self.seed] }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kernel {
    Naive,
    Blocked,
    BlockedTransposed,
    QuadraticForm,
    Determinant,
    Inverse,
}

impl Kernel {
    pub const ALL: &'static [Kernel] = &[
        Kernel::Naive,
        Kernel::Blocked,
        Kernel::BlockedTransposed,
        Kernel::QuadraticForm,
        Kernel::Determinant,
        Kernel::Inverse,
    ];

    pub const NAMES: &'static [&'static str] = &[
        "naive", "blocked", "blocked-transposed", "quadratic-form", "determinant", "inverse",
    ];

    pub fn name(self) -> &'static str
    {
        match self {
            Kernel::Naive => "naive",
            Kernel::Blocked => "blocked",
            Kernel::BlockedTransposed => "blocked-transposed",
            Kernel::QuadraticForm => "quadratic-form",
            Kernel::Determinant => "determinant",
            Kernel::Inverse => "inverse",
        }
    }
}

impl FromStr for Kernel {
    type Err = failure::Error;

    fn from_str(s: &str) -> FailResult<Kernel>
    {
        Kernel::ALL.iter().cloned()
            .find(|k| k.name() == s)
            .ok_or_else(|| format_err!("unknown kernel: {:?}", s))
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn names_round_trip() {
        assert_eq!(Kernel::ALL.len(), Kernel::NAMES.len());
        for (&kernel, &name) in Kernel::ALL.iter().zip(Kernel::NAMES) {
            assert_eq!(kernel.name(), name);
            assert_eq!(name.parse::<Kernel>().unwrap(), kernel);
        }
        assert!("strassen".parse::<Kernel>().is_err());
    }

    #[test]
    fn partial_yaml() {
        let config: BenchConfig = serde_yaml::from_str("
sizes: [4, 8]
blocking:
  block-size: 16
kernels: [inverse, blocked-transposed]
").unwrap();

        assert_eq!(config, BenchConfig {
            sizes: vec![4, 8],
            blocking: Blocking { block_size: 16, parallel: false },
            kernels: vec![Kernel::Inverse, Kernel::BlockedTransposed],
            ..BenchConfig::default()
        });
        config.validate().unwrap();
    }

    #[test]
    fn validation() {
        BenchConfig::default().validate().unwrap();
        assert!(BenchConfig { repeats: 0, ..BenchConfig::default() }.validate().is_err());
        assert!(BenchConfig { sizes: vec![3, 0], ..BenchConfig::default() }.validate().is_err());
        assert!(BenchConfig { kernels: vec![], ..BenchConfig::default() }.validate().is_err());
    }
}

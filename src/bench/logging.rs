/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;

use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Builder-style setup for logging
#[derive(Debug, Clone, Default)]
pub struct GlobalLogger {
    path: Option<PathBuf>,
    verbosity: Verbosity,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity { Default, Loud, Louder }

impl Default for Verbosity {
    fn default() -> Self { Verbosity::Default }
}

impl GlobalLogger {
    /// Also write the log to a file.
    ///
    /// NOTE: Relative paths will not be resolved until apply() is called.
    pub fn path<P: AsRef<Path>>(&mut self, path: P) -> &mut Self
    { self.path = Some(path.as_ref().to_owned()); self }

    /// Any integer will be accepted; the level will be truncated
    /// to the most extreme value supported.
    pub fn verbosity(&mut self, level: u64) -> &mut Self
    {
        self.verbosity = match level {
            0 => Verbosity::Default,
            1 => Verbosity::Loud,
            _ => Verbosity::Louder,
        };
        self
    }

    fn engine_level(&self) -> LevelFilter
    {
        match self.verbosity {
            Verbosity::Default => LevelFilter::Info,
            Verbosity::Loud => LevelFilter::Debug,
            Verbosity::Louder => LevelFilter::Trace,
        }
    }

    /// Install the logger. This can only succeed once per process.
    pub fn apply(&mut self) -> FailResult<()>
    {
        use std::time::Instant;

        let colors = ColoredLevelConfig::new()
            .error(Color::Red)
            .warn(Color::Yellow)
            .info(Color::Cyan)
            .debug(Color::White)
            .trace(Color::Magenta);

        let start = Instant::now();
        let mut fern = fern::Dispatch::new();
        fern = fern.format(move |out, message, record| {
                let t = start.elapsed();
                out.finish(format_args!("[{:>4}.{:03}s][{}][{}] {}",
                    t.as_secs(),
                    t.subsec_nanos() / 1_000_000,
                    record.target(),
                    colors.color(record.level()),
                    message))
            })
            .level(LevelFilter::Info)
            .level_for("colmat_bench", self.engine_level())
            .level_for("colmat_matrix", self.engine_level())
            .chain(std::io::stdout());

        if let Some(path) = self.path.as_ref() {
            fern = fern.chain(fern::log_file(path)?);
        }

        fern.apply()?;
        Ok(())
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_saturates() {
        let mut logger = GlobalLogger::default();
        assert_eq!(logger.engine_level(), LevelFilter::Info);
        assert_eq!(logger.verbosity(1).engine_level(), LevelFilter::Debug);
        assert_eq!(logger.verbosity(2).engine_level(), LevelFilter::Trace);
        assert_eq!(logger.verbosity(40).engine_level(), LevelFilter::Trace);
        assert_eq!(logger.verbosity(0).engine_level(), LevelFilter::Info);
    }
}

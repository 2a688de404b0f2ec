/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{BenchConfig, FailResult, GlobalLogger, Kernel};
use crate::run_benchmarks;

use clap::{App, Arg, ArgMatches};
use std::ffi::OsStr;
use std::fs::File;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        for cause in e.iter_chain() {
            error!("{}", cause);
        }

        if std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            error!("{}", e.backtrace());
        }
        std::process::exit(1);
    });
}

fn app() -> App<'static, 'static> {
    App::new("colmat-bench")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Times the matrix kernels on seeded random input and reports residuals.")
        .args(&[
            Arg::with_name("config")
                .short("c").long("config").value_name("CONFIG").takes_value(true)
                .help("YAML file with benchmark settings. Flags override its values."),
            Arg::with_name("seed")
                .long("seed").value_name("SEED").takes_value(true)
                .help("seed for the random operands"),
            Arg::with_name("size")
                .short("n").long("size").value_name("N").takes_value(true)
                .multiple(true).number_of_values(1)
                .help("edge length of the operands (may be given multiple times)"),
            Arg::with_name("repeats")
                .short("r").long("repeats").value_name("COUNT").takes_value(true)
                .help("timed calls per kernel and size"),
            Arg::with_name("block_size")
                .long("block-size").value_name("ELEMS").takes_value(true)
                .help("tile edge length for the blocked kernels"),
            Arg::with_name("parallel")
                .long("parallel")
                .help("run the blocked kernels on the rayon thread pool"),
            Arg::with_name("kernel")
                .short("k").long("kernel").value_name("KERNEL").takes_value(true)
                .multiple(true).number_of_values(1)
                .possible_values(Kernel::NAMES)
                .help("kernel to run (may be given multiple times) [default: all]"),
            Arg::with_name("output")
                .short("o").long("output").value_name("JSON").takes_value(true)
                .help("also write the reports to this file"),
            Arg::with_name("log")
                .long("log").value_name("FILE").takes_value(true)
                .help("also write the log to this file"),
            Arg::with_name("verbose")
                .short("v").long("verbose").multiple(true)
                .help("log more from the engine (repeat for even more)"),
        ])
}

fn parse_value<T>(m: &ArgMatches<'_>, name: &str) -> FailResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match m.value_of(name) {
        None => Ok(None),
        Some(s) => match s.parse() {
            Ok(x) => Ok(Some(x)),
            Err(e) => bail!("invalid value for --{}: {:?} ({})", name.replace('_', "-"), s, e),
        },
    }
}

fn resolve_config(m: &ArgMatches<'_>) -> FailResult<BenchConfig>
{
    let mut config = match m.value_of("config") {
        Some(path) => BenchConfig::from_yaml_file(path)?,
        None => BenchConfig::default(),
    };

    if let Some(seed) = parse_value(m, "seed")? {
        config.seed = seed;
    }
    if let Some(repeats) = parse_value(m, "repeats")? {
        config.repeats = repeats;
    }
    if let Some(block_size) = parse_value(m, "block_size")? {
        config.blocking.block_size = block_size;
    }
    if m.is_present("parallel") {
        config.blocking.parallel = true;
    }
    if let Some(sizes) = m.values_of("size") {
        config.sizes = sizes
            .map(|s| s.parse::<usize>().map_err(|e| format_err!("invalid value for --size: {:?} ({})", s, e)))
            .collect::<FailResult<_>>()?;
    }
    if let Some(kernels) = m.values_of("kernel") {
        config.kernels = kernels.map(|s| s.parse::<Kernel>()).collect::<FailResult<_>>()?;
    }
    Ok(config)
}

// %% CRATES: binary: colmat-bench %%
pub fn colmat_bench() {
    wrap_result_main(|| {
        let matches = app().get_matches();

        let mut logger = GlobalLogger::default();
        logger.verbosity(matches.occurrences_of("verbose"));
        if let Some(path) = matches.value_of("log") {
            logger.path(path);
        }
        logger.apply()?;

        let config = resolve_config(&matches)?;
        debug!("{:?}", config);

        let reports = run_benchmarks(&config)?;
        if let Some(path) = matches.value_of("output") {
            let file = File::create(path)
                .map_err(|e| format_err!("could not create {}: {}", path, e))?;
            serde_json::to_writer_pretty(file, &reports)?;
        }
        Ok(())
    });
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolve(args: &[&str]) -> FailResult<BenchConfig>
    {
        let argv = std::iter::once("colmat-bench").chain(args.iter().cloned());
        let matches = app().get_matches_from_safe(argv)?;
        resolve_config(&matches)
    }

    #[test]
    fn defaults() {
        assert_eq!(resolve(&[]).unwrap(), BenchConfig::default());
    }

    #[test]
    fn flags_override() {
        let config = resolve(&[
            "--seed", "7", "-n", "10", "-n", "20", "-r", "5",
            "--block-size", "32", "--parallel", "-k", "inverse", "-k", "naive",
        ]).unwrap();

        let mut expected = BenchConfig::default();
        expected.seed = 7;
        expected.sizes = vec![10, 20];
        expected.repeats = 5;
        expected.blocking.block_size = 32;
        expected.blocking.parallel = true;
        expected.kernels = vec![Kernel::Inverse, Kernel::Naive];
        assert_eq!(config, expected);
    }

    #[test]
    fn bad_numbers() {
        assert!(resolve(&["--seed", "x"]).is_err());
        assert!(resolve(&["-n", "-3"]).is_err());
        assert!(resolve(&["--block-size", "1.5"]).is_err());
    }
}

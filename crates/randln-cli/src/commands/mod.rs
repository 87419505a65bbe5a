pub mod shuffle;

use std::path::Path;

use log::LevelFilter;
use randln_core::{DeviceEntropy, EntropyError, EntropySource, OsEntropy};

/// Map the `-v` count to a log level. Warnings are always shown.
pub fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Send log output to stderr so stdout carries nothing but shuffled lines.
///
/// The level comes from the command line only; `RUST_LOG` is not read.
pub fn init_logging(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

/// Open the entropy source selected on the command line.
pub fn open_entropy(
    device: &Path,
    os_entropy: bool,
) -> Result<Box<dyn EntropySource>, EntropyError> {
    if os_entropy {
        log::debug!("using OS random number generator");
        return Ok(Box::new(OsEntropy));
    }
    Ok(Box::new(DeviceEntropy::open(device)?))
}

use std::io::{BufWriter, Write};
use std::path::Path;

use randln_core::{RandlnError, randomize_file};

/// Options for a single shuffle run, parsed from the command line.
pub struct ShuffleCommandConfig<'a> {
    pub input: &'a Path,
    pub device: &'a Path,
    pub os_entropy: bool,
}

/// Shuffle `config.input` to stdout.
///
/// The entropy source is opened before the input is touched, so a missing
/// device fails without reading the file.
pub fn run(config: &ShuffleCommandConfig<'_>) -> randln_core::Result<()> {
    let mut entropy = super::open_entropy(config.device, config.os_entropy)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = randomize_file(config.input, entropy.as_mut(), &mut out)?;
    out.flush().map_err(RandlnError::Output)?;

    log::debug!(
        "{}: {} lines, {} bytes",
        config.input.display(),
        summary.lines,
        summary.bytes
    );
    Ok(())
}

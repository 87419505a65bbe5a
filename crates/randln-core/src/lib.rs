//! # randln-core
//!
//! Print the lines of a file in a uniformly random order.
//!
//! ## Quick Start
//!
//! ```no_run
//! use randln_core::{DeviceEntropy, randomize_file};
//!
//! let mut entropy = DeviceEntropy::urandom()?;
//! let stdout = std::io::stdout();
//! let summary = randomize_file("words.txt", &mut entropy, &mut stdout.lock())?;
//! eprintln!("{} lines", summary.lines);
//! # Ok::<(), randln_core::RandlnError>(())
//! ```
//!
//! ## Architecture
//!
//! File → ByteRegion (mmap) → LineCollection → Fisher–Yates → Output
//!
//! - [`segment`](mod@segment) maps the input and splits it into `(offset, len)` records
//!   without copying any line bytes.
//! - [`shuffle`](mod@shuffle) permutes the records in place, drawing indices from an
//!   [`EntropySource`].
//! - [`emit`](mod@emit) writes the records back out, each terminated by `\n`.

pub mod emit;
pub mod entropy;
pub mod error;
pub mod segment;
pub mod shuffle;

use std::io::Write;
use std::path::Path;

pub use emit::emit_all;
pub use entropy::{DEFAULT_DEVICE, DeviceEntropy, EntropySource, OsEntropy};
pub use error::{EntropyError, RandlnError, Result};
pub use segment::{ByteRegion, LineCollection, LineRecord, count_lines, open_region, segment};
pub use shuffle::{shuffle, shuffle_lines};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Outcome of one [`randomize_file`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Lines written.
    pub lines: usize,
    /// Bytes written, terminators included.
    pub bytes: u64,
}

/// Map `path`, shuffle its lines with `entropy`, and write them to `sink`.
///
/// Nothing is written unless mapping, segmentation and shuffling all succeed.
/// The sink is not flushed.
pub fn randomize_file<E, W>(
    path: impl AsRef<Path>,
    entropy: &mut E,
    sink: &mut W,
) -> Result<RunSummary>
where
    E: EntropySource + ?Sized,
    W: Write + ?Sized,
{
    let path = path.as_ref();
    let region = open_region(path)?;
    let expected = count_lines(&region);
    log::debug!("{}: {} lines", path.display(), expected);

    let mut lines = segment(&region, expected)?;
    shuffle_lines(&mut lines, entropy)?;
    let bytes = emit_all(sink, &lines)?;

    log::info!("wrote {} shuffled lines ({} bytes)", lines.len(), bytes);
    Ok(RunSummary {
        lines: lines.len(),
        bytes,
    })
}

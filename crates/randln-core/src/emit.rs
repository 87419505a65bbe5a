//! Writes a line collection to an output sink.

use std::io::Write;

use crate::error::{RandlnError, Result};
use crate::segment::LineCollection;

/// Write every line in collection order, each followed by one `\n`.
///
/// The last line is terminated too, whether or not the input ended with a
/// terminator. The sink is neither flushed nor closed. Returns the number of
/// bytes written.
pub fn emit_all<W>(sink: &mut W, lines: &LineCollection<'_>) -> Result<u64>
where
    W: Write + ?Sized,
{
    let mut written = 0u64;
    for line in lines.lines() {
        sink.write_all(line).map_err(RandlnError::Output)?;
        sink.write_all(b"\n").map_err(RandlnError::Output)?;
        written += line.len() as u64 + 1;
    }
    Ok(written)
}

//! Random word sources that drive the shuffle.
//!
//! Every source implements the [`EntropySource`] trait. Opening a source is the
//! only state transition: once a [`DeviceEntropy`] exists it stays open until
//! it is dropped, and there is no way to reopen it.
//!
//! # Modulo bias
//!
//! [`EntropySource::draw_bounded`] reduces a full machine word with `% n`.
//! Unless `n` divides `2^usize::BITS`, low residues are very slightly more
//! likely than high ones. For line counts that fit in memory the skew is far
//! below anything a shuffle can observe, so no rejection sampling is done.

use std::fs::File;
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::Path;

use crate::error::EntropyError;

/// Default entropy device on Unix systems.
pub const DEFAULT_DEVICE: &str = "/dev/urandom";

const WORD_BYTES: usize = std::mem::size_of::<usize>();

/// Trait that every random word source must implement.
pub trait EntropySource {
    /// Draw one machine word of random bits.
    fn draw_word(&mut self) -> Result<usize, EntropyError>;

    /// Draw an index in `[0, n)` as `draw_word() % n`.
    fn draw_bounded(&mut self, n: NonZeroUsize) -> Result<usize, EntropyError> {
        Ok(self.draw_word()? % n.get())
    }
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn draw_word(&mut self) -> Result<usize, EntropyError> {
        (**self).draw_word()
    }

    fn draw_bounded(&mut self, n: NonZeroUsize) -> Result<usize, EntropyError> {
        (**self).draw_bounded(n)
    }
}

impl<E: EntropySource + ?Sized> EntropySource for Box<E> {
    fn draw_word(&mut self) -> Result<usize, EntropyError> {
        (**self).draw_word()
    }

    fn draw_bounded(&mut self, n: NonZeroUsize) -> Result<usize, EntropyError> {
        (**self).draw_bounded(n)
    }
}

// ---------------------------------------------------------------------------
// Device-backed source
// ---------------------------------------------------------------------------

/// Reads random words from a character device such as `/dev/urandom`.
#[derive(Debug)]
pub struct DeviceEntropy {
    device: File,
}

impl DeviceEntropy {
    /// Open the entropy device at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EntropyError> {
        let path = path.as_ref();
        let device = File::open(path).map_err(|source| EntropyError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("opened entropy device {}", path.display());
        Ok(Self { device })
    }

    /// Open [`DEFAULT_DEVICE`].
    pub fn urandom() -> Result<Self, EntropyError> {
        Self::open(DEFAULT_DEVICE)
    }
}

impl EntropySource for DeviceEntropy {
    /// Issues exactly one `read`. A short read means the device cannot be
    /// trusted and is reported instead of retried.
    fn draw_word(&mut self) -> Result<usize, EntropyError> {
        let mut buf = [0u8; WORD_BYTES];
        let got = self.device.read(&mut buf).map_err(EntropyError::Read)?;
        if got != WORD_BYTES {
            return Err(EntropyError::ShortRead {
                expected: WORD_BYTES,
                got,
            });
        }
        Ok(usize::from_ne_bytes(buf))
    }
}

// ---------------------------------------------------------------------------
// OS CSPRNG source
// ---------------------------------------------------------------------------

/// Draws random words from the OS CSPRNG via the `getrandom` crate.
///
/// Useful where no entropy device node is available (sandboxes, chroots).
/// Needs no handle, so it is used as a plain value: `OsEntropy`.
#[derive(Debug, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn draw_word(&mut self) -> Result<usize, EntropyError> {
        let mut buf = [0u8; WORD_BYTES];
        getrandom::fill(&mut buf).map_err(EntropyError::Os)?;
        Ok(usize::from_ne_bytes(buf))
    }
}

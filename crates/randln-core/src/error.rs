//! Error types for the shuffle pipeline.
//!
//! Every variant is terminal: the CLI reports it and exits non-zero. Nothing
//! in the pipeline retries or degrades to a partial result.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of an entropy source.
#[derive(Error, Debug)]
pub enum EntropyError {
    #[error("could not open entropy device {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("short read from entropy device: expected {expected} bytes, got {got}")]
    ShortRead { expected: usize, got: usize },

    #[error("could not read from entropy device: {0}")]
    Read(#[source] std::io::Error),

    #[error("OS random number generator failed: {0}")]
    Os(getrandom::Error),
}

/// Main error type for randln operations.
#[derive(Error, Debug)]
pub enum RandlnError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Entropy(#[from] EntropyError),

    /// Segmentation disagreed with the line count. Always a bug.
    #[error("internal error: expected {expected} lines but segmentation produced {produced}")]
    LineCountMismatch { expected: usize, produced: usize },

    #[error("could not write output: {0}")]
    Output(#[source] std::io::Error),
}

/// Result type alias for randln operations.
pub type Result<T> = std::result::Result<T, RandlnError>;

impl RandlnError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error points at a bug rather than the environment.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::LineCountMismatch { .. })
    }

    /// Whether the output reader went away before everything was written.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Output(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

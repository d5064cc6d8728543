//! Error types reported by the codec and the stream driver.

use thiserror::Error;

/// Errors that can occur while compressing, decompressing, or driving streams.
#[derive(Debug, Error)]
pub enum Error {
    /// The array extent is zero-sized along some axis or has an unsupported
    /// dimensionality.
    #[error("bad extent: {0}")]
    BadExtent(String),

    /// A read or write would run past the end of the supplied buffer.
    #[error("input ends after {have} bytes, but {need} bytes are required")]
    ShortInput {
        /// Number of bytes required to continue.
        need: usize,
        /// Number of bytes actually available.
        have: usize,
    },

    /// Conflicting or missing configuration, or a stream whose header does
    /// not match the caller's expectations.
    #[error("bad configuration: {0}")]
    BadConfig(String),

    /// An I/O failure surfaced from the chunked stream driver. The codec
    /// itself never raises this kind.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

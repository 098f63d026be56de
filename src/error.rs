//! Error type returned by every fallible operation in this crate.

use thiserror::Error;

/// Result alias over [`UnzipError`].
pub type Result<T> = std::result::Result<T, UnzipError>;

#[derive(Debug, Error)]
pub enum UnzipError {
    /// No End of Central Directory record could be found.
    #[error("Not a valid ZIP file")]
    NotAZip,

    /// A record had a bad signature or inconsistent fields.
    #[error("Invalid ZIP archive: {0}")]
    InvalidArchive(&'static str),

    /// The buffer ended before a record or payload did.
    #[error("Archive truncated: wanted {wanted} bytes at offset {offset}, got {got}")]
    Truncated { offset: u64, wanted: usize, got: usize },

    /// The archive uses a feature this crate does not read.
    #[error("Unsupported ZIP archive: {0}")]
    Unsupported(String),

    #[error("Unsupported compression method: {0}")]
    UnsupportedCompression(u16),

    #[error("CRC-32 mismatch in {name}: expected {expected:#010x}, got {actual:#010x}")]
    Crc32Mismatch {
        name: String,
        expected: u32,
        actual: u32,
    },

    #[error("Size mismatch in {name}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        name: String,
        expected: u64,
        actual: u64,
    },

    /// One of the [`UnzipOptions`](crate::UnzipOptions) limits was hit.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking decompression task panicked or was cancelled.
    #[error("Decompression task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

//! The unzip capability: archive bytes in, named entries out.

use async_trait::async_trait;

use crate::error::Result;
use crate::unzipper::ZipUnzipper;

/// One entry extracted from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnzippedFile {
    /// Path of the entry inside the archive
    pub name: String,
    /// Decompressed bytes of the entry
    pub content: Vec<u8>,
}

/// Decompress a whole archive held in memory into its entries.
///
/// Implementations take nothing but the buffer; any configuration is bound
/// when the implementation is constructed. The trait is object safe, so
/// callers can hold an `Arc<dyn Unzip>` and swap backends.
#[async_trait]
pub trait Unzip: Send + Sync {
    /// Resolve to the archive's entries in archive order.
    ///
    /// # Errors
    ///
    /// Fails on malformed, truncated, or unsupported archives. No partial
    /// result is returned.
    async fn unzip(&self, buffer: Vec<u8>) -> Result<Vec<UnzippedFile>>;
}

/// Unzip `buffer` with the default [`ZipUnzipper`].
///
/// ```no_run
/// # async fn run(archive: Vec<u8>) -> bufunzip::Result<()> {
/// for file in bufunzip::unzip(archive).await? {
///     println!("{}: {} bytes", file.name, file.content.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn unzip(buffer: Vec<u8>) -> Result<Vec<UnzippedFile>> {
    ZipUnzipper::new().unzip(buffer).await
}

mod memory;

pub use memory::MemoryReader;

use crate::error::{Result, UnzipError};
use async_trait::async_trait;

/// Trait for random access reading from a data source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer
    ///
    /// Returns the number of bytes read, which is smaller than `buf.len()`
    /// only when the source ends first.
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;

    /// Fill the whole buffer from `offset`, failing if the source is too short
    async fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let got = self.read_at(offset, buf).await?;
        if got < buf.len() {
            return Err(UnzipError::Truncated {
                offset,
                wanted: buf.len(),
                got,
            });
        }
        Ok(())
    }
}

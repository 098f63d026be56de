use super::ReadAt;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// In-memory reader over an archive buffer
///
/// The buffer sits behind an `Arc`, so callers can keep slicing payloads
/// out of it while the parser reads headers.
pub struct MemoryReader {
    data: Arc<Vec<u8>>,
}

impl MemoryReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self::from_shared(Arc::new(data))
    }

    pub fn from_shared(data: Arc<Vec<u8>>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl ReadAt for MemoryReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let Ok(start) = usize::try_from(offset) else {
            return Ok(0);
        };
        if start >= self.data.len() {
            return Ok(0);
        }

        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(n)
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

use flate2::read::DeflateDecoder;
use log::debug;
use std::io::Read;
use std::ops::Range;
use std::sync::Arc;

use crate::error::{Result, UnzipError};
use crate::io::ReadAt;

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// Upper bound on the output buffer reserved up front from a declared size
const PREALLOC_LIMIT: u64 = 16 * 1024 * 1024;

/// ZIP file extractor
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
    verify_crc: bool,
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: ZipParser::new(reader),
            verify_crc: true,
        }
    }

    /// Enable or disable CRC-32 verification of extracted data
    pub fn verify_crc(mut self, verify: bool) -> Self {
        self.verify_crc = verify;
        self
    }

    /// List all files in the archive
    pub async fn list_files(&self) -> Result<Vec<ZipFileEntry>> {
        self.parser.list_files().await
    }

    /// Locate an entry's compressed payload as a byte range of the archive
    ///
    /// The declared compressed size is checked against the archive size,
    /// so nothing is allocated from it.
    pub async fn data_range(&self, entry: &ZipFileEntry) -> Result<Range<u64>> {
        if entry.is_encrypted() {
            return Err(UnzipError::Unsupported(format!(
                "{} is encrypted",
                entry.file_name
            )));
        }

        let data_offset = self.parser.get_data_offset(entry).await?;
        let size = self.parser.reader().size();
        let truncated = || UnzipError::Truncated {
            offset: data_offset,
            wanted: usize::try_from(entry.compressed_size).unwrap_or(usize::MAX),
            got: size.saturating_sub(data_offset) as usize,
        };

        let data_end = data_offset
            .checked_add(entry.compressed_size)
            .ok_or_else(truncated)?;
        if data_end > size {
            return Err(truncated());
        }

        Ok(data_offset..data_end)
    }

    /// Read an entry's raw, still compressed payload
    pub async fn read_compressed(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        let range = self.data_range(entry).await?;
        debug!(
            "Reading {} ({} bytes at offset {})",
            entry.file_name, entry.compressed_size, range.start
        );

        let mut buf = vec![0u8; (range.end - range.start) as usize];
        self.parser
            .reader()
            .read_exact_at(range.start, &mut buf)
            .await?;

        Ok(buf)
    }

    /// Extract file data to memory
    pub async fn extract_to_memory(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        let compressed = self.read_compressed(entry).await?;
        decompress(entry, &compressed, self.verify_crc)
    }
}

/// Decompress an entry's payload and check it against the Central Directory.
///
/// Runs synchronously; callers on an async executor should move it to a
/// blocking thread.
pub fn decompress(entry: &ZipFileEntry, compressed: &[u8], verify_crc: bool) -> Result<Vec<u8>> {
    let data = match entry.compression_method {
        CompressionMethod::Stored => compressed.to_vec(),
        CompressionMethod::Deflate => {
            let mut out = Vec::with_capacity(entry.uncompressed_size.min(PREALLOC_LIMIT) as usize);
            // One byte past the declared size is enough to detect overruns
            DeflateDecoder::new(compressed)
                .take(entry.uncompressed_size.saturating_add(1))
                .read_to_end(&mut out)?;
            out
        }
        CompressionMethod::Unknown(method) => {
            return Err(UnzipError::UnsupportedCompression(method));
        }
    };

    if data.len() as u64 != entry.uncompressed_size {
        return Err(UnzipError::SizeMismatch {
            name: entry.file_name.clone(),
            expected: entry.uncompressed_size,
            actual: data.len() as u64,
        });
    }

    if verify_crc {
        let actual = crc32fast::hash(&data);
        if actual != entry.crc32 {
            return Err(UnzipError::Crc32Mismatch {
                name: entry.file_name.clone(),
                expected: entry.crc32,
                actual,
            });
        }
    }

    Ok(data)
}

use async_trait::async_trait;
use log::{debug, warn};
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::UnzipOptions;
use crate::error::{Result, UnzipError};
use crate::io::MemoryReader;
use crate::unzip::{Unzip, UnzippedFile};
use crate::zip::{ZipExtractor, ZipFileEntry, decompress};

/// [`Unzip`] implementation for ZIP archives (stored and deflate entries).
///
/// Entries are decompressed on tokio's blocking pool, concurrently, and
/// returned in Central Directory order. Must be called from within a tokio
/// runtime.
#[derive(Debug, Clone, Default)]
pub struct ZipUnzipper {
    options: UnzipOptions,
}

impl ZipUnzipper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: UnzipOptions) -> Self {
        Self { options }
    }

    /// Drop directories unless requested and enforce the configured limits
    fn select(&self, entries: Vec<ZipFileEntry>) -> Result<Vec<ZipFileEntry>> {
        let options = &self.options;

        let selected: Vec<ZipFileEntry> = entries
            .into_iter()
            .filter(|e| {
                if e.is_directory && !options.include_directories {
                    debug!("Skipping directory entry {}", e.file_name);
                    return false;
                }
                true
            })
            .collect();

        if let Some(max) = options.max_entries
            && selected.len() > max
        {
            return Err(UnzipError::LimitExceeded(format!(
                "{} entries (max {})",
                selected.len(),
                max
            )));
        }

        let mut total = 0u64;
        let mut seen = HashSet::new();
        for entry in &selected {
            if let Some(max) = options.max_entry_size
                && entry.uncompressed_size > max
            {
                return Err(UnzipError::LimitExceeded(format!(
                    "{} is {} bytes (max {})",
                    entry.file_name, entry.uncompressed_size, max
                )));
            }

            total = total.saturating_add(entry.uncompressed_size);
            if let Some(max) = options.max_total_size
                && total > max
            {
                return Err(UnzipError::LimitExceeded(format!(
                    "total size exceeds {} bytes",
                    max
                )));
            }

            if !seen.insert(entry.file_name.as_str()) {
                warn!("Duplicate entry name {}", entry.file_name);
            }
        }

        Ok(selected)
    }
}

#[async_trait]
impl Unzip for ZipUnzipper {
    async fn unzip(&self, buffer: Vec<u8>) -> Result<Vec<UnzippedFile>> {
        let buffer = Arc::new(buffer);
        let reader = Arc::new(MemoryReader::from_shared(Arc::clone(&buffer)));
        let extractor = ZipExtractor::new(reader).verify_crc(self.options.verify_crc);

        let entries = self.select(extractor.list_files().await?)?;
        debug!("Unzipping {} entries", entries.len());

        let verify_crc = self.options.verify_crc;
        let mut tasks = Vec::with_capacity(entries.len());
        for entry in entries {
            // Bounded by the buffer length, so the range fits in usize
            let range = extractor.data_range(&entry).await?;
            let range = range.start as usize..range.end as usize;
            let buffer = Arc::clone(&buffer);
            tasks.push(tokio::task::spawn_blocking(
                move || -> Result<UnzippedFile> {
                    let content = decompress(&entry, &buffer[range], verify_crc)?;
                    Ok(UnzippedFile {
                        name: entry.file_name,
                        content,
                    })
                },
            ));
        }

        // Awaiting in spawn order keeps the archive order
        let mut files = Vec::with_capacity(tasks.len());
        for task in tasks {
            files.push(task.await??);
        }

        Ok(files)
    }
}

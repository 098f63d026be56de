//! Options controlling how archives are unzipped.

/// Options bound to a [`ZipUnzipper`](crate::ZipUnzipper) at construction.
///
/// Every limit is checked against the sizes declared in the central
/// directory, before any entry is decompressed.
///
/// # Examples
///
/// ```
/// use bufunzip::UnzipOptions;
///
/// let options = UnzipOptions {
///     max_total_size: Some(64 * 1024 * 1024),
///     ..Default::default()
/// };
/// assert!(options.verify_crc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnzipOptions {
    /// Check each entry's CRC-32 after decompression.
    pub verify_crc: bool,

    /// Emit directory entries (names ending in `/`) with empty content.
    pub include_directories: bool,

    /// Maximum number of entries returned.
    pub max_entries: Option<usize>,

    /// Maximum uncompressed size of a single entry in bytes.
    pub max_entry_size: Option<u64>,

    /// Maximum uncompressed size of all entries together in bytes.
    pub max_total_size: Option<u64>,
}

impl Default for UnzipOptions {
    fn default() -> Self {
        Self {
            verify_crc: true,
            include_directories: false,
            max_entries: None,
            max_entry_size: None,
            max_total_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_verify_and_skip_directories() {
        let options = UnzipOptions::default();
        assert!(options.verify_crc);
        assert!(!options.include_directories);
        assert_eq!(options.max_entries, None);
        assert_eq!(options.max_entry_size, None);
        assert_eq!(options.max_total_size, None);
    }
}

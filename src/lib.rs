//! # bufunzip
//!
//! Asynchronously unzip a ZIP archive held in memory into named file entries.
//!
//! The capability is the [`Unzip`] trait: one async method taking the archive
//! bytes and resolving to a `Vec<`[`UnzippedFile`]`>`, each with a `name` and
//! its decompressed `content`. [`ZipUnzipper`] implements it for stored and
//! deflated ZIP entries, and [`unzip`] calls it with default options.
//!
//! ## Features
//!
//! - Entries returned in archive (Central Directory) order
//! - Support for ZIP64 format (archives larger than 4GB)
//! - Support for STORED (uncompressed) and DEFLATE compression methods
//! - CRC-32 verification and optional size limits, see [`UnzipOptions`]
//! - Decompression runs on tokio's blocking pool, off the async executor
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bufunzip::{Unzip, UnzipOptions, ZipUnzipper};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let archive = tokio::fs::read("archive.zip").await?;
//!
//!     let unzipper: Arc<dyn Unzip> = Arc::new(ZipUnzipper::with_options(UnzipOptions {
//!         max_total_size: Some(256 * 1024 * 1024),
//!         ..Default::default()
//!     }));
//!
//!     for file in unzipper.unzip(archive).await? {
//!         println!("{} ({} bytes)", file.name, file.content.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod unzip;
pub mod unzipper;
pub mod zip;

pub use cli::Cli;
pub use config::UnzipOptions;
pub use error::{Result, UnzipError};
pub use io::{MemoryReader, ReadAt};
pub use unzip::{Unzip, UnzippedFile, unzip};
pub use unzipper::ZipUnzipper;
pub use zip::{ZipExtractor, ZipFileEntry, ZipParser};

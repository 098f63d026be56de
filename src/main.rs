//! Command-line front end: reads a whole archive into memory, unzips it and
//! lists, pipes or writes out the entries.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use bufunzip::{
    Cli, MemoryReader, Unzip, UnzipOptions, UnzippedFile, ZipExtractor, ZipFileEntry, ZipUnzipper,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let buffer = read_input(&cli).await?;
    info!("Read {} from {}", format_size(buffer.len() as u64), cli.file);

    if cli.list || cli.verbose {
        return list_files(buffer, cli.verbose).await;
    }

    let unzipper = ZipUnzipper::with_options(UnzipOptions {
        verify_crc: !cli.no_crc,
        max_total_size: cli.max_size,
        ..Default::default()
    });
    let files = unzipper
        .unzip(buffer)
        .await
        .with_context(|| format!("Couldn't unzip {}", cli.file))?;

    // Positional names select entries, -x patterns exclude them
    let files_to_extract: Vec<_> = files
        .iter()
        .filter(|f| cli.files.is_empty() || cli.files.iter().any(|p| matches_name(p, &f.name)))
        .filter(|f| {
            !cli.exclude
                .iter()
                .any(|x| f.name.contains(x.as_str()) || glob_match(x, &f.name))
        })
        .collect();

    let multiple_files = cli.pipe && files_to_extract.len() > 1;
    for file in files_to_extract {
        extract_file(file, &cli, multiple_files).await?;
    }

    Ok(())
}

/// Read the whole archive from a file or stdin.
async fn read_input(cli: &Cli) -> Result<Vec<u8>> {
    if cli.is_stdin() {
        let mut buffer = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut buffer)
            .await
            .context("Couldn't read archive from stdin")?;
        Ok(buffer)
    } else {
        tokio::fs::read(&cli.file)
            .await
            .with_context(|| format!("Couldn't read {}", cli.file))
    }
}

/// List the archive's Central Directory without decompressing anything.
///
/// - Simple format (`-l`): Just file names, one per line
/// - Verbose format (`-v`): Table with sizes, compression ratio and timestamps
async fn list_files(buffer: Vec<u8>, verbose: bool) -> Result<()> {
    let extractor = ZipExtractor::new(Arc::new(MemoryReader::new(buffer)));
    let entries = extractor.list_files().await?;

    if !verbose {
        for entry in &entries {
            println!("{}", entry.file_name);
        }
        return Ok(());
    }

    println!(
        "{:>10}  {:>10}  {:>5}  {:>10}  {:>5}  Name",
        "Length", "Size", "Cmpr", "Date", "Time"
    );
    println!("{}", "-".repeat(70));

    for entry in &entries {
        let (year, month, day) = entry.mod_date();
        let (hour, minute, _second) = entry.mod_time();

        println!(
            "{:>10}  {:>10}  {}  {:04}-{:02}-{:02}  {:02}:{:02}  {}",
            entry.uncompressed_size,
            entry.compressed_size,
            ratio(entry.compressed_size, entry.uncompressed_size),
            year,
            month,
            day,
            hour,
            minute,
            entry.file_name
        );
    }

    let (total_uncompressed, total_compressed, file_count) = totals(&entries);
    println!("{}", "-".repeat(70));
    println!(
        "{:>10}  {:>10}  {}  {:>21}  {} files",
        total_uncompressed,
        total_compressed,
        ratio(total_compressed, total_uncompressed),
        "",
        file_count
    );

    Ok(())
}

/// Write a single entry to stdout or below the output directory.
async fn extract_file(file: &UnzippedFile, cli: &Cli, show_filename: bool) -> Result<()> {
    if cli.pipe {
        let mut stdout = tokio::io::stdout();
        if show_filename {
            stdout
                .write_all(format!("--- {} ---\n", file.name).as_bytes())
                .await?;
        }
        stdout.write_all(&file.content).await?;
        stdout.flush().await?;
        return Ok(());
    }

    let Some(relative) = output_relative_path(&file.name, cli.junk_paths) else {
        warn!("Skipping: {} (unsafe path)", file.name);
        return Ok(());
    };
    let output_path = match cli.extract_dir {
        Some(ref dir) => PathBuf::from(dir).join(relative),
        None => relative,
    };

    if output_path.exists() {
        if cli.never_overwrite {
            warn!("Skipping: {} (file exists)", file.name);
            return Ok(());
        }
        if !cli.overwrite {
            warn!("Skipping: {} (use -o to overwrite)", file.name);
            return Ok(());
        }
    }

    if !cli.is_quiet() {
        println!("  extracting: {}", file.name);
    }

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Couldn't create {}", parent.display()))?;
    }
    tokio::fs::write(&output_path, &file.content)
        .await
        .with_context(|| format!("Couldn't write {}", output_path.display()))?;

    Ok(())
}

/// Map an entry name to a path relative to the output directory.
///
/// Returns `None` for names that would land outside it (absolute paths,
/// `..` components) or that have no file name left.
fn output_relative_path(name: &str, junk_paths: bool) -> Option<PathBuf> {
    let path = Path::new(name);
    if junk_paths {
        return path.file_name().map(PathBuf::from);
    }

    let mut relative = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}

/// Match a positional FILES argument against an entry name.
///
/// Patterns with wildcards are globbed against the full name; plain names
/// match the full path or the basename.
fn matches_name(pattern: &str, name: &str) -> bool {
    if has_glob_chars(pattern) {
        return glob_match(pattern, name);
    }

    let basename = Path::new(name)
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    name == pattern || basename == pattern
}

fn has_glob_chars(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Simple glob pattern matching supporting `*` and `?` wildcards.
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern_chars: Vec<char> = pattern.chars().collect();
    let text_chars: Vec<char> = text.chars().collect();

    fn do_match(pattern: &[char], text: &[char]) -> bool {
        match (pattern.first(), text.first()) {
            (None, None) => true,
            // Star matches zero characters, or one and stays
            (Some('*'), _) => {
                do_match(&pattern[1..], text) || (!text.is_empty() && do_match(pattern, &text[1..]))
            }
            (Some('?'), Some(_)) => do_match(&pattern[1..], &text[1..]),
            (Some(p), Some(t)) if *p == *t => do_match(&pattern[1..], &text[1..]),
            _ => false,
        }
    }

    do_match(&pattern_chars, &text_chars)
}

/// Uncompressed size, compressed size and count of the non-directory entries
fn totals(entries: &[ZipFileEntry]) -> (u64, u64, usize) {
    entries
        .iter()
        .filter(|e| !e.is_directory)
        .fold((0u64, 0u64, 0usize), |(uncompressed, compressed, count), e| {
            (
                uncompressed.saturating_add(e.uncompressed_size),
                compressed.saturating_add(e.compressed_size),
                count + 1,
            )
        })
}

/// Percentage saved by compression, right-aligned to five columns
fn ratio(compressed: u64, uncompressed: u64) -> String {
    let saved = if uncompressed > 0 && compressed <= uncompressed {
        100 - (compressed as u128 * 100 / uncompressed as u128)
    } else {
        0
    };
    format!("{:>4}%", saved)
}

/// Format a byte size into a human-readable string.
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bufunzip::zip::CompressionMethod;

    #[test]
    fn glob_matching() {
        assert!(glob_match("*.txt", "readme.txt"));
        assert!(glob_match("file?.dat", "file1.dat"));
        assert!(glob_match("dir/*", "dir/a/b.txt"));
        assert!(!glob_match("*.txt", "readme.md"));
        assert!(!glob_match("file?.dat", "file.dat"));
    }

    #[test]
    fn name_selection() {
        assert!(matches_name("b.txt", "dir/b.txt"));
        assert!(matches_name("dir/b.txt", "dir/b.txt"));
        assert!(matches_name("*.txt", "dir/b.txt"));
        assert!(!matches_name("a.txt", "dir/b.txt"));
    }

    #[test]
    fn unsafe_paths_are_refused() {
        assert_eq!(
            output_relative_path("a/./b.txt", false),
            Some(PathBuf::from("a/b.txt"))
        );
        assert_eq!(
            output_relative_path("a/b.txt", true),
            Some(PathBuf::from("b.txt"))
        );
        assert_eq!(output_relative_path("../evil.txt", false), None);
        assert_eq!(output_relative_path("a/../../evil.txt", false), None);
        assert_eq!(output_relative_path("/etc/passwd", false), None);
        assert_eq!(output_relative_path("./", false), None);
    }

    #[test]
    fn sizes_and_ratios() {
        assert_eq!(format_size(500), "500 bytes");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1048576), "1.00 MB");
        assert_eq!(ratio(25, 100), "  75%");
        assert_eq!(ratio(0, 0), "   0%");
        assert_eq!(ratio(120, 100), "   0%");
        assert_eq!(ratio(u64::MAX, u64::MAX), "   0%");
        assert_eq!(ratio(1 << 62, u64::MAX), "  75%");
    }

    fn entry(name: &str, uncompressed: u64, compressed: u64) -> ZipFileEntry {
        ZipFileEntry {
            file_name: name.to_string(),
            compression_method: CompressionMethod::Deflate,
            compressed_size: compressed,
            uncompressed_size: uncompressed,
            crc32: 0,
            lfh_offset: 0,
            flags: 0,
            last_mod_time: 0,
            last_mod_date: 0,
            is_directory: name.ends_with('/'),
        }
    }

    #[test]
    fn totals_skip_directories_and_saturate() {
        let entries = [
            entry("dir/", 0, 0),
            entry("dir/a", 10, 4),
            entry("dir/b", 20, 6),
        ];
        assert_eq!(totals(&entries), (30, 10, 2));

        let huge = [
            entry("a", u64::MAX, u64::MAX - 1),
            entry("b", u64::MAX, u64::MAX - 1),
        ];
        assert_eq!(totals(&huge), (u64::MAX, u64::MAX, 2));
    }
}

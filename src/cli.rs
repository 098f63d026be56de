use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "bufunzip")]
#[command(version)]
#[command(about = "Unzip a ZIP archive entirely in memory", long_about = None)]
#[command(after_help = "Examples:\n  \
  bufunzip data1.zip -x joe        extract all files except joe from data1.zip\n  \
  bufunzip -p foo.zip | more       send contents of foo.zip via pipe into more\n  \
  curl -s URL | bufunzip -l -      list files of a ZIP read from stdin")]
pub struct Cli {
    /// ZIP file path, or - for stdin
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Files to extract (default: all)
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// List files (short format)
    #[arg(short = 'l')]
    pub list: bool,

    /// List verbosely
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Extract files to pipe, no messages
    #[arg(short = 'p')]
    pub pipe: bool,

    /// Extract files into exdir
    #[arg(short = 'd', value_name = "DIR")]
    pub extract_dir: Option<String>,

    /// Exclude files that follow
    #[arg(short = 'x', value_name = "FILE", num_args = 1..)]
    pub exclude: Vec<String>,

    /// Never overwrite existing files
    #[arg(short = 'n')]
    pub never_overwrite: bool,

    /// Overwrite files WITHOUT prompting
    #[arg(short = 'o')]
    pub overwrite: bool,

    /// Junk paths (do not make directories)
    #[arg(short = 'j')]
    pub junk_paths: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Skip CRC-32 verification
    #[arg(long = "no-crc")]
    pub no_crc: bool,

    /// Refuse archives whose entries add up to more than BYTES
    #[arg(long = "max-size", value_name = "BYTES")]
    pub max_size: Option<u64>,
}

impl Cli {
    pub fn is_stdin(&self) -> bool {
        self.file == "-"
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0 || self.pipe
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    /// Default log level when `RUST_LOG` is not set
    pub fn log_level(&self) -> LevelFilter {
        if self.is_very_quiet() {
            LevelFilter::Off
        } else if self.is_quiet() {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_extract_flags() {
        let cli = Cli::parse_from(["bufunzip", "a.zip", "*.txt", "-d", "out", "-x", "skip.txt", "-o"]);
        assert_eq!(cli.file, "a.zip");
        assert_eq!(cli.files, ["*.txt"]);
        assert_eq!(cli.extract_dir.as_deref(), Some("out"));
        assert_eq!(cli.exclude, ["skip.txt"]);
        assert!(cli.overwrite);
        assert!(!cli.is_stdin());
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn pipe_and_quiet_silence_logging() {
        let cli = Cli::parse_from(["bufunzip", "-p", "-"]);
        assert!(cli.is_stdin());
        assert!(cli.is_quiet());
        assert_eq!(cli.log_level(), LevelFilter::Error);

        let cli = Cli::parse_from(["bufunzip", "-qq", "a.zip"]);
        assert!(cli.is_very_quiet());
        assert_eq!(cli.log_level(), LevelFilter::Off);
    }
}

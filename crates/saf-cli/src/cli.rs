//! CLI argument definitions for the SAF packager.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "saf-packager",
    version,
    about = "SAF Packager - Convert spreadsheet metadata to DSpace Simple Archive Format",
    long_about = "Convert a metadata spreadsheet plus a bitstream directory into\n\
                  per-record Simple Archive Format packages (dublin_core.xml,\n\
                  contents manifest, copied files), validate a finished package\n\
                  tree, or clean up bitstream filenames."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a spreadsheet and bitstream directory into SAF packages.
    Convert(ConvertArgs),

    /// Validate a finished package tree for structural completeness.
    Validate(ValidateArgs),

    /// Normalize bitstream filenames in place, with a rename log.
    Rename(RenameArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the metadata spreadsheet (CSV).
    #[arg(value_name = "SPREADSHEET")]
    pub spreadsheet: PathBuf,

    /// Directory holding the bitstream files referenced by the spreadsheet.
    #[arg(long = "files-dir", value_name = "DIR", default_value = "bitstreams_dir")]
    pub files_dir: PathBuf,

    /// Output directory for the generated packages.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "saf_converted")]
    pub output_dir: PathBuf,

    /// JSON file overriding the default configuration.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log all decisions without creating directories or copying files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Rewrite camera-raw extensions (.cr2/.cr3 -> .jpeg) in filename
    /// cells before matching.
    #[arg(long = "retarget-raw")]
    pub retarget_raw: bool,

    /// Write a machine-readable JSON run report to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Root directory of a finished package tree.
    #[arg(value_name = "OUTPUT_ROOT")]
    pub output_root: PathBuf,

    /// JSON file overriding the default configuration.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RenameArgs {
    /// Directory whose filenames should be normalized.
    #[arg(value_name = "FILES_DIR")]
    pub files_dir: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

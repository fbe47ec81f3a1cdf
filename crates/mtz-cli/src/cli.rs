//! CLI argument definitions for the MTZ header viewer.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mtzshow",
    version,
    about = "Show the header of an MTZ reflection file",
    long_about = "Decode and validate the header of an MTZ reflection file.\n\n\
                  Prints the cell, symmetry, datasets and columns. History, batch\n\
                  headers and the remaining raw records are shown on request."
)]
pub struct Cli {
    /// MTZ file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Show history lines.
    #[arg(long = "history")]
    pub history: bool,

    /// Show batch headers.
    #[arg(long = "batches")]
    pub batches: bool,

    /// Show header records not folded into datasets or columns.
    #[arg(long = "records")]
    pub records: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Keep leading spaces of history lines.
    #[arg(long = "keep-history-indent")]
    pub keep_history_indent: bool,

    /// Fail when the header holds more than this many records.
    #[arg(long = "record-limit", value_name = "N")]
    pub record_limit: Option<usize>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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

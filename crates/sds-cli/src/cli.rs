//! CLI argument definitions for the SDS register.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sds-register",
    version,
    about = "SDS register - track Safety Data Sheets for chemical substances",
    long_about = "Track Safety Data Sheet records for chemical substances used at a site.\n\n\
                  The register lives in an XLSX workbook. Records carry the substance name,\n\
                  producer, sheet date, reference link, notes and GHS pictogram codes; a sheet\n\
                  counts as current for three years from its date."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Create a new register workbook.
    Init(InitArgs),

    /// Add one substance record to a register.
    Add(AddArgs),

    /// List register contents, optionally filtered by name.
    List(ListArgs),

    /// Export a register to a workbook for backup or bulk editing.
    Export(ExportArgs),

    /// Replace a register's contents with those of another workbook.
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct InitArgs {
    /// Path of the register workbook to create.
    #[arg(value_name = "REGISTER")]
    pub register: PathBuf,

    /// Start from the demo records instead of an empty register.
    #[arg(long = "seed")]
    pub seed: bool,

    /// Overwrite an existing register file.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Parser)]
pub struct AddArgs {
    /// Path of the register workbook.
    #[arg(value_name = "REGISTER")]
    pub register: PathBuf,

    /// Substance name (may be left empty).
    #[arg(long = "name", default_value = "")]
    pub name: String,

    /// Producer of the substance.
    #[arg(long = "producer", default_value = "")]
    pub producer: String,

    /// Date of the Safety Data Sheet, `YYYY-MM-DD`.
    #[arg(long = "date", value_name = "YYYY-MM-DD", default_value = "")]
    pub date: String,

    /// Reference link to the sheet.
    #[arg(long = "link", default_value = "")]
    pub link: String,

    /// Free-form notes.
    #[arg(long = "notes", default_value = "")]
    pub notes: String,

    /// Comma-separated GHS pictogram codes, e.g. "GHS07,GHS08".
    #[arg(long = "ghs", value_name = "CODES", default_value = "")]
    pub ghs: String,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Path of the register workbook.
    #[arg(value_name = "REGISTER")]
    pub register: PathBuf,

    /// Show only substances whose name contains this text.
    #[arg(long = "filter", value_name = "TERM")]
    pub filter: Option<String>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Path of the register workbook.
    #[arg(value_name = "REGISTER")]
    pub register: PathBuf,

    /// Output path (default: sds_verification.xlsx).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Path of the register workbook to replace.
    #[arg(value_name = "REGISTER")]
    pub register: PathBuf,

    /// Workbook to import. Its first sheet must carry a `name` column.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
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

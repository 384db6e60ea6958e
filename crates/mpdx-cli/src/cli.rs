//! CLI argument definitions for the import wizard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mpdx-import",
    version,
    about = "MPDX CSV import - map spreadsheet columns and values onto MPDX contacts",
    long_about = "Upload a CSV file of contacts to MPDX, map its headers to contact fields,\n\
                  map raw column values to MPDX constants, and confirm the import."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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
    /// List the headers MPDX accepts and the constants published for them.
    Headers,

    /// Upload a CSV file and start a new import.
    Upload(UploadArgs),

    /// Show the header and value mappings of an import.
    Show(ImportArgs),

    /// Map raw headers to contact fields and save the headers step.
    MapHeader(MapHeaderArgs),

    /// Map raw values of a field to constants and save the values step.
    MapValue(MapValueArgs),

    /// Confirm the preview and start importing contacts.
    Finish(ImportArgs),
}

#[derive(Args)]
pub struct AccountArgs {
    /// Account list the import belongs to.
    #[arg(long = "account-list", env = "MPDX_ACCOUNT_LIST_ID", value_name = "ID")]
    pub account_list_id: String,
}

#[derive(Args)]
pub struct UploadArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// CSV file to upload.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Import id returned by `upload`.
    #[arg(value_name = "IMPORT_ID")]
    pub import_id: String,
}

#[derive(Args)]
pub struct MapHeaderArgs {
    #[command(flatten)]
    pub import: ImportArgs,

    /// `HEADER=FIELD` pairs; use `HEADER=-` to leave a header out.
    #[arg(long = "map", value_name = "HEADER=FIELD", required = true)]
    pub mappings: Vec<String>,
}

#[derive(Args)]
pub struct MapValueArgs {
    #[command(flatten)]
    pub import: ImportArgs,

    /// Field whose raw values are mapped (e.g. `newsletter`).
    #[arg(long = "field", value_name = "FIELD")]
    pub field: String,

    /// `RAW=CONSTANT` pairs; an empty constant unassigns the value.
    #[arg(long = "map", value_name = "RAW=CONSTANT", required = true)]
    pub mappings: Vec<String>,
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

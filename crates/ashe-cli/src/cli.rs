//! CLI argument definitions for `ashe-tables`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ashe-tables",
    version,
    about = "Build ASHE publication tables from survey extracts",
    long_about = "Build ASHE publication tables from survey extracts.\n\n\
                  For each table and variable, writes six workbooks: unsafe CVs and values,\n\
                  safe values, interim and final main CVs, and the main values table with\n\
                  year-on-year change."
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
    /// Build the configured tables.
    Run(RunArgs),

    /// List the published tables and their source extracts.
    Tables,

    /// List the survey variables.
    Variables,
}

#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Configuration file (default: ashe.toml, if present).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Survey year to publish (default: the current year).
    #[arg(long = "year")]
    pub year: Option<i32>,

    /// Directory holding this year's extracts.
    #[arg(long = "csv-dir", value_name = "DIR")]
    pub csv_dir: Option<PathBuf>,

    /// Directory holding last year's extracts.
    #[arg(long = "previous-csv-dir", value_name = "DIR")]
    pub previous_csv_dir: Option<PathBuf>,

    /// Directory holding the table and footnote templates.
    #[arg(long = "template-dir", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Root output directory; each table gets a subdirectory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Table to build, by full name. Repeatable; replaces the configured list.
    #[arg(long = "table", value_name = "NAME")]
    pub tables: Vec<String>,

    /// Variable to build, by name or shorthand. Repeatable; default is all.
    #[arg(long = "variable", value_name = "NAME")]
    pub variables: Vec<String>,

    /// Assemble every table but write nothing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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

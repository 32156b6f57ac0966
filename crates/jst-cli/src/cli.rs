//! CLI argument definitions for the JST risk analysis tool.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use jst_model::options::DEFAULT_JST_CODE_LENGTH;

#[derive(Parser)]
#[command(
    name = "jst-risk",
    version,
    about = "Regional risk analysis over Polish administrative (JST) datasets",
    long_about = "Reconcile fire-event, alcohol-outlet, population, and optional\n\
                  area datasets on the (jst_code, year) key, then report basic\n\
                  statistics, correlations, and data-quality findings as JSON."
)]
pub struct Cli {
    /// Fire/intervention dataset: a CSV/XLSX file or a directory of them.
    #[arg(long = "psp", value_name = "PATH")]
    pub psp: PathBuf,

    /// Alcohol-outlet dataset: a CSV/XLSX file or a directory of them.
    #[arg(long = "alcohol", value_name = "PATH")]
    pub alcohol: PathBuf,

    /// Population dataset: a CSV/XLSX file or a directory of them.
    #[arg(long = "population", value_name = "PATH")]
    pub population: PathBuf,

    /// Optional region-area dataset; may be static (no year column).
    #[arg(long = "jst-area", value_name = "PATH")]
    pub jst_area: Option<PathBuf>,

    /// Length that region codes are truncated to after stripping non-digits.
    #[arg(long = "jst-code-length", value_name = "N", default_value_t = DEFAULT_JST_CODE_LENGTH)]
    pub jst_code_length: usize,

    /// Path of the JSON summary report.
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Also write the merged table as CSV to this path.
    #[arg(long = "save-merged", value_name = "PATH")]
    pub save_merged: Option<PathBuf>,

    /// Write per-stage timings to this path.
    #[arg(long = "profile-out", value_name = "PATH")]
    pub profile_out: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

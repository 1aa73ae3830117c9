//! CLI argument definitions for the place-name matcher.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use placematch_model::DEFAULT_CUTOFF;

#[derive(Parser)]
#[command(
    name = "placematch",
    version,
    about = "Reconcile inconsistently transliterated place names across datasets",
    long_about = "Match the place names of a source dataset against a reference name list.\n\n\
                  A name is matched automatically only when edit distance and similarity\n\
                  ratio pick the same reference name and the ratio reaches the cutoff.\n\
                  Everything else is listed for manual resolution."
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

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match source names against reference names and report the residual.
    Match(MatchArgs),

    /// Relabel a dataset column using a mapping table.
    Apply(ApplyArgs),

    /// Rank every reference name against one source name.
    Inspect(InspectArgs),
}

/// Reference name list shared by `match` and `inspect`.
#[derive(Args)]
pub struct TargetArgs {
    /// CSV file holding the reference (canonical) names.
    #[arg(long = "target", value_name = "FILE")]
    pub target: PathBuf,

    /// Column of the reference file with the names.
    #[arg(long = "target-column", value_name = "COLUMN")]
    pub target_column: String,

    /// Column of the reference file with the parent region.
    #[arg(long = "target-parent", value_name = "COLUMN")]
    pub target_parent: Option<String>,

    /// Compare names as written instead of capitalizing them first.
    #[arg(long = "no-case-fold")]
    pub no_case_fold: bool,
}

#[derive(Parser)]
pub struct MatchArgs {
    /// CSV file holding the names to reconcile.
    #[arg(long = "source", value_name = "FILE")]
    pub source: PathBuf,

    /// Column of the source file with the names.
    #[arg(long = "source-column", value_name = "COLUMN")]
    pub source_column: String,

    /// Column of the source file with the parent region.
    #[arg(long = "source-parent", value_name = "COLUMN")]
    pub source_parent: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Minimum similarity ratio for an automatic match.
    #[arg(long = "cutoff", value_name = "RATIO", default_value_t = DEFAULT_CUTOFF)]
    pub cutoff: f64,

    /// Keep exact matches in the candidate matrix instead of filtering them out first.
    #[arg(long = "keep-exact")]
    pub keep_exact: bool,

    /// Print every reference name ranked per source name, as JSON.
    #[arg(long = "detail")]
    pub detail: bool,

    /// Only match names against reference names with the same parent region.
    ///
    /// Requires --source-parent and --target-parent. Names whose parent has
    /// no reference names fall back to the whole reference list.
    #[arg(long = "scope-by-parent")]
    pub scope_by_parent: bool,

    /// CSV of manual overrides (original_name,canonical_name).
    #[arg(long = "overrides", value_name = "FILE")]
    pub overrides: Option<PathBuf>,

    /// Read the override table as canonical_name -> original_name.
    #[arg(long = "invert-overrides", requires = "overrides")]
    pub invert_overrides: bool,

    /// Discard the automatic match of this source name (repeatable).
    #[arg(long = "reject", value_name = "NAME")]
    pub reject: Vec<String>,

    /// Write the final mapping table to this CSV file.
    #[arg(long = "mapping-out", value_name = "FILE")]
    pub mapping_out: Option<PathBuf>,

    /// Write the match table (CSV) or, with --detail, the ranked listing (JSON).
    #[arg(long = "report-out", value_name = "FILE")]
    pub report_out: Option<PathBuf>,

    /// Exit with status 2 when names remain unresolved.
    #[arg(long = "fail-on-unmatched")]
    pub fail_on_unmatched: bool,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Dataset to relabel.
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Column holding the place names.
    #[arg(long = "column", value_name = "COLUMN")]
    pub column: String,

    /// Mapping table written by `match --mapping-out`, possibly hand-edited.
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: PathBuf,

    /// Where to write the relabeled dataset.
    #[arg(long = "output", value_name = "FILE")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Source name to rank reference names against.
    #[arg(value_name = "NAME")]
    pub name: String,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Show only the best N reference names.
    #[arg(long = "top", value_name = "N", default_value_t = 10)]
    pub top: usize,
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

//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "feednav",
    version,
    about = "Inspect page navigation, breadcrumbs and shareable URLs for a transit feed",
    long_about = "Inspect the navigation layer of the transit feed editor.\n\n\
                  Decodes shareable URLs into page states, prints breadcrumb trails\n\
                  with names resolved from a GTFS directory, and replays navigation."
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

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a URL or query string into a page state.
    Decode(DecodeArgs),

    /// Print the breadcrumb trail for a URL.
    Crumbs(CrumbsArgs),

    /// Replay navigation steps and print the resulting history.
    Walk(WalkArgs),

    /// Preload display names from a feed and report counts.
    Names(NamesArgs),
}

#[derive(Parser)]
pub struct DecodeArgs {
    /// Query string, `?query` or relative URL such as `/?route=R1`.
    #[arg(value_name = "QUERY")]
    pub query: String,
}

#[derive(Parser)]
pub struct CrumbsArgs {
    /// GTFS directory containing agency.txt, routes.txt and stops.txt.
    #[arg(value_name = "FEED_DIR")]
    pub feed_dir: PathBuf,

    /// Query string, `?query` or relative URL.
    #[arg(value_name = "QUERY")]
    pub query: String,
}

#[derive(Parser)]
pub struct WalkArgs {
    /// GTFS directory containing agency.txt, routes.txt and stops.txt.
    #[arg(value_name = "FEED_DIR")]
    pub feed_dir: PathBuf,

    /// Steps: home, agency:A, route:R, timetable:R:S[:D], stop:S, service:S, back.
    #[arg(value_name = "STEP", required = true)]
    pub steps: Vec<String>,
}

#[derive(Parser)]
pub struct NamesArgs {
    /// GTFS directory containing agency.txt, routes.txt and stops.txt.
    #[arg(value_name = "FEED_DIR")]
    pub feed_dir: PathBuf,

    /// Override the number of stops to preload.
    #[arg(long = "stop-limit", value_name = "N")]
    pub stop_limit: Option<usize>,
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

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use veduta::{MapBounds, SortField};

/// Command-line arguments accepted by the `veduta` binary.
#[derive(Parser, Debug)]
#[command(
    name = "veduta",
    version,
    about = "Search, filter and sort a historical image atlas corpus"
)]
pub(crate) struct CliArgs {
    #[arg(
        value_name = "CORPUS",
        help = "Corpus file containing the index's JSON documents (default: from configuration)"
    )]
    pub(crate) corpus: Option<PathBuf>,
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "VEDUTA_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'q',
        long,
        value_name = "TEXT",
        help = "Free-text query; whitespace-separated terms must all match (default: none)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        short = 'k',
        long,
        value_name = "TAG",
        help = "Restrict to one collection, or 'all' (default: all)"
    )]
    pub(crate) collection: Option<String>,
    #[arg(
        long,
        value_name = "YEAR",
        help = "Start of the temporal range (default: configured year floor)"
    )]
    pub(crate) from: Option<i32>,
    #[arg(
        long,
        value_name = "YEAR",
        help = "End of the temporal range (default: current year)"
    )]
    pub(crate) to: Option<i32>,
    #[arg(
        short = 'b',
        long,
        value_name = "MINLON,MINLAT,MAXLON,MAXLAT",
        allow_hyphen_values = true,
        help = "Spatial bounding box; points on an edge are excluded (default: none)"
    )]
    pub(crate) bounds: Option<MapBounds>,
    #[arg(
        short = 's',
        long,
        value_name = "FIELD",
        help = "Sort by 'title', 'creator' or 'date' (default: filtered order)"
    )]
    pub(crate) sort: Option<SortField>,
    #[arg(
        short = 'd',
        long,
        help = "Sort descending (default: ascending)"
    )]
    pub(crate) descending: bool,
    #[arg(
        long,
        value_name = "SSID",
        help = "Select a record after filtering and report its position (default: none)"
    )]
    pub(crate) select: Option<String>,
    #[arg(
        long = "year-floor",
        value_name = "YEAR",
        help = "Override the configured start of the default temporal range"
    )]
    pub(crate) year_floor: Option<i32>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the results"
    )]
    pub(crate) output: OutputFormat,
}

/// Output format for the result listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

/// Parse the process arguments.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

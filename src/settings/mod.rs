//! Layered settings for the `veduta` binary: defaults, configuration files,
//! `VEDUTA_*` environment variables, then CLI overrides.

mod raw;
mod sources;

use std::path::PathBuf;

use anyhow::{Result, anyhow};

use veduta::{MapBounds, SortField, StoreConfig};

use crate::cli::CliArgs;
use raw::RawSettings;

/// Fully resolved settings the workflow runs with.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    /// Corpus file to load; taken from the CLI or a `[corpus]` section.
    pub(crate) corpus: Option<PathBuf>,
    pub(crate) store: StoreConfig,
    pub(crate) query: Option<String>,
    pub(crate) collection: Option<String>,
    pub(crate) from: Option<i32>,
    pub(crate) to: Option<i32>,
    pub(crate) bounds: Option<MapBounds>,
    pub(crate) sort: Option<SortField>,
    pub(crate) descending: bool,
    pub(crate) select: Option<String>,
}

impl Settings {
    /// Print a short summary of where the run will read from.
    pub(crate) fn print_summary(&self) {
        match &self.corpus {
            Some(path) => println!("corpus: {}", path.display()),
            None => println!("corpus: (none)"),
        }
        println!("year floor: {}", self.store.year_floor);
        println!("initial year cursor: {}", self.store.initial_year);
        if let Some(query) = &self.query {
            println!("query: {query}");
        }
        if let Some(collection) = &self.collection {
            println!("collection: {collection}");
        }
    }
}

/// Load settings by combining CLI arguments, configuration files and
/// environment variables.
pub(crate) fn load(cli: &CliArgs) -> Result<Settings> {
    let builder = sources::build_config(cli)?;
    let mut raw: RawSettings = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve()
}

use std::path::PathBuf;

use anyhow::{Result, anyhow, ensure};
use serde::Deserialize;

use veduta::{MapBounds, SortField, StoreConfig};

use super::Settings;
use crate::cli::CliArgs;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawSettings {
    atlas: AtlasSection,
    corpus: CorpusSection,
    search: SearchSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AtlasSection {
    year_floor: Option<i32>,
    initial_year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CorpusSection {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
    query: Option<String>,
    collection: Option<String>,
    from: Option<i32>,
    to: Option<i32>,
    /// Bounding box as `minLon,minLat,maxLon,maxLat`, same as the CLI flag.
    bounds: Option<String>,
    sort: Option<String>,
    descending: Option<bool>,
    select: Option<String>,
}

impl RawSettings {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(path) = &cli.corpus {
            self.corpus.path = Some(path.clone());
        }
        if let Some(year_floor) = cli.year_floor {
            self.atlas.year_floor = Some(year_floor);
        }
        if let Some(query) = &cli.query {
            self.search.query = Some(query.clone());
        }
        if let Some(collection) = &cli.collection {
            self.search.collection = Some(collection.clone());
        }
        if cli.from.is_some() {
            self.search.from = cli.from;
        }
        if cli.to.is_some() {
            self.search.to = cli.to;
        }
        if let Some(bounds) = cli.bounds {
            self.search.bounds = Some(format!(
                "{},{},{},{}",
                bounds.min_longitude, bounds.min_latitude, bounds.max_longitude, bounds.max_latitude
            ));
        }
        if let Some(sort) = cli.sort {
            self.search.sort = Some(sort.to_string());
        }
        if cli.descending {
            self.search.descending = Some(true);
        }
        if let Some(select) = &cli.select {
            self.search.select = Some(select.clone());
        }
    }

    /// Convert the raw settings into a [`Settings`], validating and filling
    /// defaults where required.
    pub(super) fn resolve(self) -> Result<Settings> {
        let defaults = StoreConfig::default();
        let store = StoreConfig {
            year_floor: self.atlas.year_floor.unwrap_or(defaults.year_floor),
            initial_year: self.atlas.initial_year.unwrap_or(defaults.initial_year),
        };
        ensure!(
            store.year_floor <= store.initial_year,
            "year floor {} must not exceed the initial year cursor {}",
            store.year_floor,
            store.initial_year
        );

        let bounds = self
            .search
            .bounds
            .as_deref()
            .map(|value| value.parse::<MapBounds>().map_err(|err| anyhow!(err)))
            .transpose()?;
        let sort = self
            .search
            .sort
            .as_deref()
            .map(|value| value.parse::<SortField>().map_err(|err| anyhow!(err)))
            .transpose()?;

        Ok(Settings {
            corpus: self.corpus.path,
            store,
            query: self.search.query,
            collection: self.search.collection,
            from: self.search.from,
            to: self.search.to,
            bounds,
            sort,
            descending: self.search.descending.unwrap_or(false),
            select: self.search.select,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn cli_overrides_win_over_file_values() {
        let mut raw = RawSettings::default();
        raw.search.query = Some("from-file".into());
        raw.atlas.year_floor = Some(1600);

        raw.apply_cli_overrides(&cli(&["veduta", "-q", "from-cli", "--year-floor", "1700"]));
        let settings = raw.resolve().expect("resolve");

        assert_eq!(settings.query.as_deref(), Some("from-cli"));
        assert_eq!(settings.store.year_floor, 1700);
    }

    #[test]
    fn bounds_and_sort_strings_resolve_to_domain_types() {
        let mut raw = RawSettings::default();
        raw.search.bounds = Some("-44,-23,-43,-22".into());
        raw.search.sort = Some("title".into());

        let settings = raw.resolve().expect("resolve");
        assert_eq!(settings.bounds, Some(MapBounds::new(-44.0, -23.0, -43.0, -22.0)));
        assert_eq!(settings.sort, Some(SortField::Title));
    }

    #[test]
    fn a_floor_above_the_cursor_is_rejected() {
        let mut raw = RawSettings::default();
        raw.atlas.year_floor = Some(1950);

        assert!(raw.resolve().is_err());
    }

    #[test]
    fn malformed_bounds_are_rejected() {
        let mut raw = RawSettings::default();
        raw.search.bounds = Some("not,a,bounding".into());
        assert!(raw.resolve().is_err());
    }
}

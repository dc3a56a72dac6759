//! The reactive store owning the canonical query state.
//!
//! One explicitly-constructed [`Store`] instance owns a [`QueryState`]; all
//! writes go through [`Store::dispatch`] and all reads through
//! [`Store::state`]. After every action the store re-derives whatever that
//! action invalidated, synchronously:
//!
//! - **Rule A** — any change to the corpus, query text, date range, sort
//!   field, sort direction, collection filter or bounding box re-runs the
//!   search pipeline and the facet aggregator.
//! - **Rule B** — a change to the selected record stores the selection's
//!   position within the active subset and retargets the year cursor to the
//!   record's first year.
//!
//! Each action declares which rules it triggers (see
//! [`Action::recomputes_active`]), so the dependency sets are auditable
//! rather than inferred.

mod action;

pub use action::Action;

use chrono::Datelike;
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::search::{SearchParams, facet_counts, search};
use crate::types::{
    CollectionFilter, ImageRecord, MapBounds, SortField, VIEWPOINT_COLLECTION, ViewDensity,
    YearRange,
};

/// Default lower bound of the temporal range.
pub const DEFAULT_YEAR_FLOOR: i32 = 1500;

/// Default position of the year display cursor.
pub const DEFAULT_YEAR_CURSOR: i32 = 1900;

/// Tunables fixed at store construction.
#[derive(Debug, Clone, Copy)]
pub struct StoreConfig {
    /// Lower bound of the default temporal range.
    pub year_floor: i32,
    /// Initial position of the year display cursor.
    pub initial_year: i32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            year_floor: DEFAULT_YEAR_FLOOR,
            initial_year: DEFAULT_YEAR_CURSOR,
        }
    }
}

/// The canonical state: the corpus, every query dimension, and the derived
/// views.
///
/// `active`, `facets` and `last_selected_pos` are pure functions of the other
/// fields; they are only ever written by the store's own recompute paths.
/// Collaborators read this snapshot through [`Store::state`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    /// Full corpus in load order.
    pub corpus: Vec<ImageRecord>,
    /// Free-text query.
    pub query: String,
    /// Inclusive temporal range.
    pub dates: YearRange,
    /// Year display cursor, independent of `dates`.
    pub year: i32,
    pub collection: CollectionFilter,
    pub bounds: Option<MapBounds>,
    pub sort: Option<SortField>,
    /// `true` sorts ascending.
    pub ascending: bool,
    /// Index of the selected record in `corpus`.
    pub selected: Option<usize>,
    /// Requested result layout; carried through untouched.
    pub density: ViewDensity,
    /// Derived: indices of the filtered-and-sorted active subset.
    pub active: Vec<usize>,
    /// Derived: per-collection counts plus the `"all"` entry.
    pub facets: IndexMap<String, usize>,
    /// Derived: position of the selection within `active` when it was made.
    pub last_selected_pos: Option<usize>,
}

impl QueryState {
    fn new(config: StoreConfig) -> Self {
        Self {
            corpus: Vec::new(),
            query: String::new(),
            dates: YearRange::new(config.year_floor, current_year()),
            year: config.initial_year,
            collection: CollectionFilter::All,
            bounds: None,
            sort: None,
            ascending: true,
            selected: None,
            density: ViewDensity::default(),
            active: Vec::new(),
            facets: IndexMap::new(),
            last_selected_pos: None,
        }
    }
}

/// Reactive store over a [`QueryState`].
#[derive(Debug)]
pub struct Store {
    state: QueryState,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Construct a store with the default year floor and cursor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Construct a store with explicit tunables.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        let mut store = Self {
            state: QueryState::new(config),
        };
        store.recompute_active();
        store
    }

    /// Read access to the full state snapshot.
    #[must_use]
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Apply a typed action and re-derive whatever it invalidated.
    pub fn dispatch(&mut self, action: Action) {
        let recompute = action.recomputes_active();
        let sync = action.syncs_selection();

        self.apply(action);

        if recompute {
            self.recompute_active();
        }
        if sync {
            self.sync_selection();
        }
    }

    /// Decode and apply a collaborator wire message.
    ///
    /// Returns `false`, leaving the state untouched, for unknown kinds and
    /// malformed payloads.
    pub fn dispatch_message(&mut self, kind: &str, payload: &serde_json::Value) -> bool {
        match Action::parse(kind, payload) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => {
                debug!(kind, "ignoring unrecognized action");
                false
            }
        }
    }

    /// Records of the active subset, in active order.
    pub fn active_records(&self) -> impl Iterator<Item = &ImageRecord> {
        self.state.active.iter().map(|&index| &self.state.corpus[index])
    }

    /// The selected record, when one is selected and still resolvable.
    #[must_use]
    pub fn selected_record(&self) -> Option<&ImageRecord> {
        self.state.corpus.get(self.state.selected?)
    }

    /// Active records in the viewpoint collection, for the map's markers.
    pub fn viewpoints(&self) -> impl Iterator<Item = &ImageRecord> {
        self.active_records()
            .filter(|record| record.collection == VIEWPOINT_COLLECTION)
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::SetCorpus(records) => {
                info!(count = records.len(), "replacing corpus");
                self.state.corpus = records;
                // Indices into the old corpus would alias arbitrary records.
                self.state.selected = None;
                self.state.last_selected_pos = None;
            }
            Action::SetQuery(query) => self.state.query = query,
            Action::SetDates(dates) => self.state.dates = dates,
            Action::SetYear(year) => self.state.year = year,
            Action::SetSort(sort) => self.state.sort = sort,
            Action::ToggleDirection => self.state.ascending = !self.state.ascending,
            Action::SetCollection(collection) => self.state.collection = collection,
            Action::SetBounds(bounds) => self.state.bounds = bounds,
            Action::SetSelected(selected) => self.state.selected = selected,
            Action::SetDensity(density) => self.state.density = density,
        }
    }

    /// Rule A: re-run pipeline and aggregator against the current state.
    fn recompute_active(&mut self) {
        let params = SearchParams {
            query: &self.state.query,
            dates: self.state.dates,
            collection: &self.state.collection,
            bounds: self.state.bounds,
            sort: self.state.sort,
            ascending: self.state.ascending,
        };
        let active = search(&self.state.corpus, &params);
        let facets = facet_counts(&self.state.corpus, &params);
        debug!(active = active.len(), "recomputed active subset");

        self.state.active = active;
        self.state.facets = facets;
    }

    /// Rule B: remember where the selection sits in the active subset and
    /// retarget the year cursor. One-way: the cursor follows the selection,
    /// never the reverse.
    fn sync_selection(&mut self) {
        let Some(selected) = self.state.selected else {
            return;
        };
        self.state.last_selected_pos =
            self.state.active.iter().position(|&index| index == selected);
        if let Some(firstyear) = self.state.corpus.get(selected).and_then(|r| r.firstyear) {
            self.state.year = firstyear;
        }
    }
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn corpus() -> Vec<ImageRecord> {
        vec![
            ImageRecord::new("v1")
                .with_title("Entrada da Barra")
                .with_years(1820, 1825)
                .with_collection("views"),
            ImageRecord::new("m1")
                .with_title("Planta da Cidade")
                .with_years(1870, 1870)
                .with_collection("maps"),
            ImageRecord::new("v2")
                .with_title("Avenida Central")
                .with_years(1905, 1906)
                .with_collection("views")
                .with_location(-43.176, -22.905),
        ]
    }

    fn loaded_store() -> Store {
        let mut store = Store::new();
        store.dispatch(Action::SetCorpus(corpus()));
        store
    }

    #[test]
    fn corpus_load_derives_active_and_facets() {
        let store = loaded_store();
        assert_eq!(store.state().active, vec![0, 1, 2]);
        assert_eq!(store.state().facets.get("views"), Some(&2));
        assert_eq!(store.state().facets.get("all"), Some(&3));
    }

    #[test]
    fn query_changes_recompute_synchronously() {
        let mut store = loaded_store();
        store.dispatch(Action::SetQuery("planta".into()));
        assert_eq!(store.state().active, vec![1]);

        store.dispatch(Action::SetQuery(String::new()));
        assert_eq!(store.state().active, vec![0, 1, 2]);
    }

    #[test]
    fn identical_dispatches_yield_identical_state() {
        let build = || {
            let mut store = loaded_store();
            store.dispatch(Action::SetQuery("da".into()));
            store.dispatch(Action::SetSort(Some(SortField::Date)));
            store.dispatch(Action::SetDates(YearRange::new(1800, 1900)));
            store
        };
        assert_eq!(build().state(), build().state());
    }

    #[test]
    fn selection_sync_targets_year_and_position() {
        let mut store = loaded_store();
        store.dispatch(Action::SetCollection(CollectionFilter::from_tag("views")));
        assert_eq!(store.state().active, vec![0, 2]);

        store.dispatch(Action::SetSelected(Some(2)));
        assert_eq!(store.state().year, 1905, "cursor follows the selection");
        assert_eq!(store.state().last_selected_pos, Some(1));
    }

    #[test]
    fn selection_outside_the_active_subset_has_no_position() {
        let mut store = loaded_store();
        store.dispatch(Action::SetCollection(CollectionFilter::from_tag("maps")));
        store.dispatch(Action::SetSelected(Some(0)));

        assert_eq!(store.state().last_selected_pos, None);
        assert_eq!(store.state().year, 1820, "the year still follows");
    }

    #[test]
    fn deselection_keeps_the_last_position() {
        let mut store = loaded_store();
        store.dispatch(Action::SetSelected(Some(1)));
        assert_eq!(store.state().last_selected_pos, Some(1));

        store.dispatch(Action::SetSelected(None));
        assert_eq!(store.state().last_selected_pos, Some(1));
        assert_eq!(store.state().year, 1870);
    }

    #[test]
    fn selection_without_firstyear_leaves_the_cursor() {
        let mut store = Store::new();
        store.dispatch(Action::SetCorpus(vec![ImageRecord::new("undated")]));
        store.dispatch(Action::SetSelected(Some(0)));
        assert_eq!(store.state().year, DEFAULT_YEAR_CURSOR);
    }

    #[test]
    fn changing_the_year_cursor_does_not_recompute() {
        let mut store = loaded_store();
        let before = store.state().active.clone();
        store.dispatch(Action::SetYear(1700));
        assert_eq!(store.state().active, before);
        assert_eq!(store.state().year, 1700);
    }

    #[test]
    fn corpus_replacement_clears_the_selection() {
        let mut store = loaded_store();
        store.dispatch(Action::SetSelected(Some(1)));

        store.dispatch(Action::SetCorpus(vec![ImageRecord::new("fresh")]));
        assert_eq!(store.state().selected, None);
        assert_eq!(store.state().last_selected_pos, None);
        assert_eq!(store.state().facets.get("all"), Some(&0), "no years, no match");
    }

    #[test]
    fn bounds_filter_requires_location() {
        let mut store = loaded_store();
        store.dispatch(Action::SetBounds(Some(MapBounds::new(
            -44.0, -23.0, -43.0, -22.0,
        ))));
        assert_eq!(store.state().active, vec![2], "only the located record survives");

        store.dispatch(Action::SetBounds(None));
        assert_eq!(store.state().active, vec![0, 1, 2]);
    }

    #[test]
    fn toggling_direction_reverses_a_date_sort() {
        let mut store = loaded_store();
        store.dispatch(Action::SetSort(Some(SortField::Date)));
        assert_eq!(store.state().active, vec![0, 1, 2]);

        store.dispatch(Action::ToggleDirection);
        assert!(!store.state().ascending);
        assert_eq!(store.state().active, vec![2, 1, 0]);
    }

    #[test]
    fn density_is_cosmetic() {
        let mut store = loaded_store();
        let before = store.state().clone();
        store.dispatch(Action::SetDensity(ViewDensity::Grid));

        assert_eq!(store.state().density, ViewDensity::Grid);
        assert_eq!(store.state().active, before.active);
        assert_eq!(store.state().facets, before.facets);
    }

    #[test]
    fn unknown_wire_kinds_change_nothing() {
        let mut store = loaded_store();
        let before = store.state().clone();

        assert!(!store.dispatch_message("SET_BASEMAP_OPACITY", &json!(42)));
        assert!(!store.dispatch_message("SET_QUERY", &json!({"nested": true})));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn wire_messages_drive_the_store() {
        let mut store = loaded_store();

        assert!(store.dispatch_message("SET_QUERY", &json!("avenida")));
        assert_eq!(store.state().active, vec![2]);

        assert!(store.dispatch_message("SET_TEMPORAL_RANGE", &json!([1800, 1850])));
        assert!(store.dispatch_message("SET_QUERY", &json!("")));
        assert_eq!(store.state().active, vec![0]);
    }

    #[test]
    fn viewpoints_track_the_active_subset() {
        let mut store = loaded_store();
        let ssids: Vec<&str> = store.viewpoints().map(|r| r.ssid.as_str()).collect();
        assert_eq!(ssids, vec!["v1", "v2"]);

        store.dispatch(Action::SetDates(YearRange::new(1860, 1880)));
        assert_eq!(store.viewpoints().count(), 0, "maps alone remain active");
    }
}

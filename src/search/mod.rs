//! The search pipeline: predicate filtering followed by the sort stage.
//!
//! Everything here is a pure function over a corpus snapshot; the reactive
//! store in [`crate::store`] owns the state and decides when to re-run the
//! pipeline. Results are indices into the corpus, kept in corpus order unless
//! a sort field is set.

mod facets;
mod predicates;
mod sort;

pub use facets::{ALL_FACET, facet_counts};
pub use predicates::TextQuery;
pub use sort::sort_indices;

use crate::types::{CollectionFilter, ImageRecord, MapBounds, SortField, YearRange};

/// One snapshot of every query dimension the pipeline consumes.
#[derive(Debug, Clone)]
pub struct SearchParams<'a> {
    pub query: &'a str,
    pub dates: YearRange,
    pub collection: &'a CollectionFilter,
    pub bounds: Option<MapBounds>,
    pub sort: Option<SortField>,
    pub ascending: bool,
}

/// Reduce the corpus to the indices satisfying every active predicate, then
/// order them according to the sort dimension.
#[must_use]
pub fn search(corpus: &[ImageRecord], params: &SearchParams<'_>) -> Vec<usize> {
    let filtered = filter_indices(corpus, params, true);
    sort_indices(corpus, filtered, params.sort, params.ascending)
}

/// Run the predicate stage alone.
///
/// `scope_collection` exists for the facet aggregator, which needs the same
/// view with the collection dimension left open.
pub(crate) fn filter_indices(
    corpus: &[ImageRecord],
    params: &SearchParams<'_>,
    scope_collection: bool,
) -> Vec<usize> {
    let text = TextQuery::compile(params.query);

    corpus
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            text.matches(record)
                && (!scope_collection || params.collection.admits(&record.collection))
                && params
                    .bounds
                    .is_none_or(|bounds| predicates::within_bounds(record, &bounds))
                && predicates::overlaps_range(record, params.dates)
        })
        .map(|(index, _)| index)
        .collect()
}

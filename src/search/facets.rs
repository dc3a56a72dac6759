//! Per-collection counts over the collection-unscoped view.

use indexmap::IndexMap;

use super::{SearchParams, filter_indices};
use crate::types::ImageRecord;

/// Key of the synthetic entry holding the total count of the unscoped view.
pub const ALL_FACET: &str = "all";

/// Count matching records per collection, ignoring the collection filter.
///
/// The view is intentionally unscoped from the collection dimension so that
/// while one collection is selected the counts still show how many results
/// exist in the others. Tags appear in first-seen corpus order, followed by
/// the [`ALL_FACET`] total; since every record carries exactly one tag, the
/// per-tag counts always sum to that total.
#[must_use]
pub fn facet_counts(corpus: &[ImageRecord], params: &SearchParams<'_>) -> IndexMap<String, usize> {
    let view = filter_indices(corpus, params, false);

    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for &index in &view {
        *counts.entry(corpus[index].collection.clone()).or_insert(0) += 1;
    }
    counts.insert(ALL_FACET.to_string(), view.len());
    counts
}

//! Per-dimension predicates over a single record.
//!
//! Each predicate treats a missing required field as a non-match, never an
//! error; the pipeline silently excludes malformed records.

use regex::{Regex, RegexBuilder};

use crate::normalize::unaccent;
use crate::types::{ImageRecord, MapBounds, YearRange};

/// Compiled free-text dimension of a query.
///
/// The query splits on whitespace into terms; a record matches when every term
/// matches at least one searchable field (AND across terms, OR across fields).
/// Terms are compiled once per query, not once per record.
#[derive(Debug)]
pub struct TextQuery {
    terms: Vec<Regex>,
    unmatchable: bool,
}

impl TextQuery {
    /// Compile the query string into per-term matchers.
    ///
    /// Terms are accent-folded and escaped before compilation, so pattern
    /// metacharacters in user input match themselves. The escaped literal can
    /// only fail to compile at pathological sizes; such a query degrades to
    /// matching nothing rather than erroring.
    #[must_use]
    pub fn compile(query: &str) -> Self {
        let mut terms = Vec::new();
        for term in query.split_whitespace() {
            let pattern = regex::escape(&unaccent(term));
            match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                Ok(regex) => terms.push(regex),
                Err(_) => {
                    return Self {
                        terms: Vec::new(),
                        unmatchable: true,
                    };
                }
            }
        }
        Self {
            terms,
            unmatchable: false,
        }
    }

    /// Return `true` when the record satisfies every term.
    ///
    /// An empty query is inactive and matches everything.
    #[must_use]
    pub fn matches(&self, record: &ImageRecord) -> bool {
        if self.unmatchable {
            return false;
        }
        self.terms.iter().all(|term| term_matches(term, record))
    }
}

/// Test one term against the searchable fields of a record.
///
/// Title, creator, source and depicts are accent-folded before matching; the
/// ssid and the display date are matched raw.
fn term_matches(term: &Regex, record: &ImageRecord) -> bool {
    if let Some(title) = &record.title
        && term.is_match(&unaccent(title))
    {
        return true;
    }
    if let Some(creator) = &record.creator
        && term.is_match(&unaccent(creator))
    {
        return true;
    }
    if term.is_match(&record.ssid) {
        return true;
    }
    if let Some(date) = &record.date
        && term.is_match(date)
    {
        return true;
    }
    record
        .source
        .iter()
        .chain(&record.depicts)
        .any(|value| term.is_match(&unaccent(value)))
}

/// Spatial predicate: both coordinates present and strictly inside the bounds.
pub(crate) fn within_bounds(record: &ImageRecord, bounds: &MapBounds) -> bool {
    match (record.longitude, record.latitude) {
        (Some(longitude), Some(latitude)) => bounds.contains(longitude, latitude),
        _ => false,
    }
}

/// Temporal predicate: the record's year span overlaps the range, inclusive.
/// Records missing either bound never match.
pub(crate) fn overlaps_range(record: &ImageRecord, range: YearRange) -> bool {
    match (record.firstyear, record.lastyear) {
        (Some(firstyear), Some(lastyear)) => range.overlaps(firstyear, lastyear),
        _ => false,
    }
}
